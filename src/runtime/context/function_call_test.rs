use crate::runtime::{
    EnvRef, Runtime, ValueRef,
    error::{ErrorStatus, RtResult},
};

fn lookup_x(rt: &mut Runtime, env: EnvRef, _arg: ValueRef) -> RtResult<ValueRef> {
    rt.env_lookup(env, "x")
}

fn factorial(rt: &mut Runtime, env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let n = rt.as_int(arg)?;
    if n <= 1 {
        return rt.int(1);
    }
    let this = rt.env_lookup(env, "fact")?;
    let smaller = rt.int(n - 1)?;
    let rest = rt.function_call(this, smaller);
    rt.release_all(&[this, smaller])?;
    let rest = rest?;
    let product = rt.as_int(rest)? * n;
    rt.release(rest)?;
    rt.int(product)
}

fn add_first(rt: &mut Runtime, env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let inner = rt.env_create(Some(env))?;
    rt.env_bind(inner, "a", arg)?;
    let f = rt.function_create(add_second, inner, Some("add_a"));
    rt.env_release(inner)?;
    f
}

fn add_second(rt: &mut Runtime, env: EnvRef, arg: ValueRef) -> RtResult<ValueRef> {
    let a = rt.env_lookup(env, "a")?;
    let sum = rt.add(a, arg);
    rt.release(a)?;
    sum
}

#[test]
fn call_sees_captured_environment() {
    let mut rt = Runtime::new();
    let env = rt.env_create(None).unwrap();
    let x = rt.int(10).unwrap();
    rt.env_bind(env, "x", x).unwrap();
    let f = rt.function_create(lookup_x, env, Some("get_x")).unwrap();
    let unit = rt.unit().unwrap();

    let result = rt.function_call(f, unit).unwrap();
    assert_eq!(rt.as_int(result).unwrap(), 10);
    assert_eq!(rt.function_name(f).unwrap().as_deref(), Some("get_x"));
}

#[test]
fn closure_outlives_creating_scope_handle() {
    let mut rt = Runtime::new();
    let env = rt.env_create(None).unwrap();
    let x = rt.int(4).unwrap();
    rt.env_bind(env, "x", x).unwrap();
    rt.release(x).unwrap();
    let f = rt.function_create(lookup_x, env, None).unwrap();
    rt.env_release(env).unwrap();

    let unit = rt.unit().unwrap();
    let result = rt.function_call(f, unit).unwrap();
    assert_eq!(rt.as_int(result).unwrap(), 4);

    rt.release_all(&[result, unit, f]).unwrap();
    assert_eq!(rt.live_count(), 0);
}

#[test]
fn recursive_function_through_weak_binding() {
    let mut rt = Runtime::new();
    let env = rt.env_create(None).unwrap();
    let fact = rt.function_create(factorial, env, Some("fact")).unwrap();
    rt.env_bind_recursive(env, "fact", fact).unwrap();
    rt.env_release(env).unwrap();

    let five = rt.int(5).unwrap();
    let result = rt.function_call(fact, five).unwrap();
    assert_eq!(rt.as_int(result).unwrap(), 120);

    rt.release_all(&[result, five, fact]).unwrap();
    assert_eq!(rt.live_count(), 0);
}

#[test]
fn calling_a_non_function_is_invalid() {
    let mut rt = Runtime::new();
    let n = rt.int(1).unwrap();
    let err = rt.function_call(n, n).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::InvalidFunctionCall);
    assert_eq!(rt.last_error(), ErrorStatus::InvalidFunctionCall);
}

#[test]
fn apply_curries_arguments() {
    let mut rt = Runtime::new();
    let env = rt.env_create(None).unwrap();
    let add = rt.function_create(add_first, env, Some("add")).unwrap();
    let two = rt.int(2).unwrap();
    let three = rt.int(3).unwrap();

    let sum = rt.apply(add, &[two, three]).unwrap();
    assert_eq!(rt.as_int(sum).unwrap(), 5);

    let same = rt.apply(add, &[]).unwrap();
    assert_eq!(same, add);
    assert_eq!(rt.ref_count(add).unwrap(), 2);

    rt.release_all(&[same, sum, two, three, add]).unwrap();
    rt.env_release(env).unwrap();
    assert_eq!(rt.live_count(), 0);
}

#[test]
fn apply_with_too_many_arguments_fails_cleanly() {
    let mut rt = Runtime::new();
    let env = rt.env_create(None).unwrap();
    let add = rt.function_create(add_first, env, None).unwrap();
    let one = rt.int(1).unwrap();

    let err = rt.apply(add, &[one, one, one]).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::InvalidFunctionCall);

    rt.release_all(&[one, add]).unwrap();
    rt.env_release(env).unwrap();
    assert_eq!(rt.live_count(), 0);
}
