use crate::runtime::{
    EnvRef, Runtime, ValueRef,
    config::RuntimeConfig,
    error::{ErrorStatus, RtResult},
};

fn show(rt: &mut Runtime, env: EnvRef, _args: &[ValueRef]) -> RtResult<ValueRef> {
    rt.env_lookup(env, "n")
}

fn other(rt: &mut Runtime, _env: EnvRef, _args: &[ValueRef]) -> RtResult<ValueRef> {
    rt.string("other")
}

fn add_to(rt: &mut Runtime, env: EnvRef, args: &[ValueRef]) -> RtResult<ValueRef> {
    let n = rt.env_lookup(env, "n")?;
    let sum = rt.add(n, args[0]);
    rt.release(n)?;
    sum
}

fn show_via_self(rt: &mut Runtime, env: EnvRef, _args: &[ValueRef]) -> RtResult<ValueRef> {
    let me = rt.env_lookup(env, "self")?;
    let shown = rt.method_call(me, "show", &[]);
    rt.release(me)?;
    shown
}

fn read_global(rt: &mut Runtime, env: EnvRef, _args: &[ValueRef]) -> RtResult<ValueRef> {
    rt.env_lookup(env, "base")
}

fn counter(rt: &mut Runtime) -> ValueRef {
    let class = rt.class_create("Counter", None, &["n"]).unwrap();
    rt.class_add_method(class, "show", show, &[]).unwrap();
    rt.class_add_method(class, "add", add_to, &["k"]).unwrap();
    class
}

#[test]
fn method_sees_field_bindings() {
    let mut rt = Runtime::new();
    counter(&mut rt);
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();

    let shown = rt.method_call(obj, "show", &[]).unwrap();
    assert_eq!(rt.as_int(shown).unwrap(), 5);

    let two = rt.int(2).unwrap();
    let sum = rt.method_call(obj, "add", &[two]).unwrap();
    assert_eq!(rt.as_int(sum).unwrap(), 7);
}

#[test]
fn missing_method_is_field_not_found() {
    let mut rt = Runtime::new();
    counter(&mut rt);
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();
    let live = rt.live_count();

    let err = rt.method_call(obj, "reset", &[]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::FieldNotFound);
    assert_eq!(rt.last_error(), ErrorStatus::FieldNotFound);
    assert_eq!(rt.live_count(), live);
}

#[test]
fn unregistered_class_is_undefined() {
    let mut rt = Runtime::new();
    let err = rt.object_create("Ghost", &[]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::UndefinedVariable);
    assert_eq!(rt.class_lookup("Ghost").unwrap_err().status(), ErrorStatus::UndefinedVariable);
}

#[test]
fn method_call_on_non_object_is_type_mismatch() {
    let mut rt = Runtime::new();
    let n = rt.int(1).unwrap();
    assert_eq!(rt.method_call(n, "show", &[]).unwrap_err().status(), ErrorStatus::TypeMismatch);
}

#[test]
fn field_count_is_checked_by_default() {
    let mut rt = Runtime::new();
    counter(&mut rt);
    let a = rt.int(1).unwrap();
    let err = rt.object_create("Counter", &[a, a]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::TypeMismatch);
    assert_eq!(rt.ref_count(a).unwrap(), 1);
}

#[test]
fn lenient_field_count_truncates() {
    let mut rt = Runtime::with_config(RuntimeConfig {
        strict_field_arity: false,
        ..RuntimeConfig::default()
    });
    counter(&mut rt);
    let a = rt.int(1).unwrap();
    let b = rt.int(2).unwrap();
    let obj = rt.object_create("Counter", &[a, b]).unwrap();

    let shown = rt.method_call(obj, "show", &[]).unwrap();
    assert_eq!(shown, a);

    let bare = rt.object_create("Counter", &[]).unwrap();
    let err = rt.method_call(bare, "show", &[]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::UndefinedVariable);
}

#[test]
fn method_arity_is_enforced_when_configured() {
    let mut rt = Runtime::with_config(RuntimeConfig {
        enforce_method_arity: true,
        ..RuntimeConfig::default()
    });
    counter(&mut rt);
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();

    let err = rt.method_call(obj, "add", &[]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::InvalidFunctionCall);
    assert!(rt.method_call(obj, "show", &[]).is_ok());
}

#[test]
fn first_registered_method_wins() {
    let mut rt = Runtime::new();
    let class = counter(&mut rt);
    rt.class_add_method(class, "show", other, &[]).unwrap();
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();

    let shown = rt.method_call(obj, "show", &[]).unwrap();
    assert_eq!(rt.as_int(shown).unwrap(), 5);
}

#[test]
fn objects_snapshot_methods_at_creation() {
    let mut rt = Runtime::new();
    let class = counter(&mut rt);
    let five = rt.int(5).unwrap();
    let before = rt.object_create("Counter", &[five]).unwrap();
    rt.class_add_method(class, "other", other, &[]).unwrap();
    let after = rt.object_create("Counter", &[five]).unwrap();

    assert!(rt.method_call(before, "other", &[]).is_err());
    assert!(rt.method_call(after, "other", &[]).is_ok());
}

#[test]
fn redefined_class_keeps_old_objects_working() {
    let mut rt = Runtime::new();
    let old_class = counter(&mut rt);
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();
    rt.release(old_class).unwrap();

    let new_class = rt.class_create("Counter", Some("Base"), &["m"]).unwrap();
    assert!(rt.is_live(old_class));

    let shown = rt.method_call(obj, "show", &[]).unwrap();
    assert_eq!(rt.as_int(shown).unwrap(), 5);

    let looked_up = rt.class_lookup("Counter").unwrap();
    assert_eq!(looked_up, new_class);
    assert_eq!(rt.class_superclass(looked_up).unwrap().as_deref(), Some("Base"));
    assert_eq!(rt.class_field_names(looked_up).unwrap(), vec!["m"]);
}

#[test]
fn receiver_is_bound_as_self() {
    let mut rt = Runtime::new();
    let class = counter(&mut rt);
    rt.class_add_method(class, "show_again", show_via_self, &[]).unwrap();
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();

    let shown = rt.method_call(obj, "show_again", &[]).unwrap();
    assert_eq!(rt.as_int(shown).unwrap(), 5);
}

#[test]
fn self_is_not_a_valid_field_name() {
    let mut rt = Runtime::new();
    let err = rt.class_create("Node", None, &["value", "self"]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::TypeMismatch);
    assert_eq!(rt.last_error(), ErrorStatus::TypeMismatch);

    let err = rt.class_lookup("Node").unwrap_err();
    assert_eq!(err.status(), ErrorStatus::UndefinedVariable);
    assert_eq!(rt.shutdown(), 0);
}

#[test]
fn methods_reach_the_global_environment() {
    let mut rt = Runtime::new();
    let class = rt.class_create("Reader", None, &[]).unwrap();
    rt.class_add_method(class, "read", read_global, &[]).unwrap();
    let obj = rt.object_create("Reader", &[]).unwrap();

    let err = rt.method_call(obj, "read", &[]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::UndefinedVariable);

    let global = rt.env_create(None).unwrap();
    let base = rt.int(100).unwrap();
    rt.env_bind(global, "base", base).unwrap();
    rt.set_global_env(Some(global)).unwrap();
    rt.env_release(global).unwrap();

    let result = rt.method_call(obj, "read", &[]).unwrap();
    assert_eq!(result, base);

    rt.set_global_env(None).unwrap();
    assert!(!rt.heap().is_live(global.handle()));
}

#[test]
fn object_accessors() {
    let mut rt = Runtime::new();
    counter(&mut rt);
    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();

    assert_eq!(rt.object_class_name(obj).unwrap(), "Counter");
    let n = rt.object_field(obj, "n").unwrap();
    assert_eq!(n, five);
    assert_eq!(rt.object_field(obj, "z").unwrap_err().status(), ErrorStatus::FieldNotFound);
}

#[test]
fn shutdown_after_full_release_reports_no_leaks() {
    let mut rt = Runtime::new();
    let class = counter(&mut rt);
    let global = rt.env_create(None).unwrap();
    rt.install_builtins(global).unwrap();
    rt.set_global_env(Some(global)).unwrap();
    rt.env_release(global).unwrap();

    let five = rt.int(5).unwrap();
    let obj = rt.object_create("Counter", &[five]).unwrap();
    let shown = rt.method_call(obj, "show", &[]).unwrap();

    rt.release_all(&[shown, obj, five, class]).unwrap();
    assert_eq!(rt.shutdown(), 0);
}
