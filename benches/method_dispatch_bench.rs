use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use luoyan::{EnvRef, RtResult, Runtime, ValueRef};

fn get_n(rt: &mut Runtime, env: EnvRef, _args: &[ValueRef]) -> RtResult<ValueRef> {
    rt.env_lookup(env, "n")
}

fn add_k(rt: &mut Runtime, env: EnvRef, args: &[ValueRef]) -> RtResult<ValueRef> {
    let n = rt.env_lookup(env, "n")?;
    let sum = rt.add(n, args[0]);
    rt.release(n)?;
    sum
}

fn setup() -> (Runtime, ValueRef, ValueRef) {
    let mut rt = Runtime::new();
    let global = rt.env_create(None).unwrap();
    rt.install_builtins(global).unwrap();
    rt.set_global_env(Some(global)).unwrap();
    rt.env_release(global).unwrap();

    let class = rt.class_create("Counter", None, &["n"]).unwrap();
    for filler in ["a", "b", "c", "d", "e", "f", "g"] {
        rt.class_add_method(class, filler, get_n, &[]).unwrap();
    }
    rt.class_add_method(class, "get", get_n, &[]).unwrap();
    rt.class_add_method(class, "add", add_k, &["k"]).unwrap();
    rt.release(class).unwrap();

    let n = rt.int(41).unwrap();
    let obj = rt.object_create("Counter", &[n]).unwrap();
    rt.release(n).unwrap();
    let one = rt.int(1).unwrap();
    (rt, obj, one)
}

fn bench_method_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("runtime/method_dispatch");
    group.throughput(Throughput::Elements(1));

    let (mut rt, obj, one) = setup();
    group.bench_function("no_args", |b| {
        b.iter(|| {
            let result = rt.method_call(black_box(obj), "get", &[]).unwrap();
            rt.release(result).unwrap();
        });
    });
    group.bench_function("one_arg", |b| {
        b.iter(|| {
            let result = rt.method_call(black_box(obj), "add", &[one]).unwrap();
            rt.release(result).unwrap();
        });
    });
    group.finish();

    rt.release_all(&[obj, one]).unwrap();
    black_box(rt.shutdown());
}

criterion_group!(benches, bench_method_dispatch);
criterion_main!(benches);
