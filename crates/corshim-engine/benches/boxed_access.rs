use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use corshim_engine::{BindingFlags, BoxedValue, HostArray, MemberTypes, TypeRegistry};
use corshim_sdk::HostModifiers;

fn bench_get_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_set");

    let inline = BoxedValue::new(0i32);
    group.bench_function("inline", |b| {
        b.iter(|| {
            inline.set(black_box(7));
            inline.get()
        });
    });

    let array = HostArray::from_slice(&[0i32; 64]);
    let view = BoxedValue::in_array(&array, 31).unwrap();
    group.bench_function("array_view", |b| {
        b.iter(|| {
            view.set(black_box(7));
            view.get()
        });
    });

    group.finish();
}

fn bench_volatile(c: &mut Criterion) {
    let mut group = c.benchmark_group("volatile");

    let single = BoxedValue::new(0.0f32);
    group.bench_function("single", |b| {
        b.iter(|| {
            single.volatile_set(black_box(1.5)).unwrap();
            single.volatile_get().unwrap()
        });
    });

    let array = HostArray::from_slice(&[0u64; 16]);
    let view = BoxedValue::in_array(&array, 9).unwrap();
    group.bench_function("array_view_u64", |b| {
        b.iter(|| {
            view.volatile_set(black_box(u64::MAX)).unwrap();
            view.volatile_get().unwrap()
        });
    });

    group.finish();
}

fn bench_hash_and_text(c: &mut Criterion) {
    let double = BoxedValue::new(std::f64::consts::PI);
    c.bench_function("hash_double", |b| b.iter(|| black_box(&double).hash_code()));
    c.bench_function("display_double", |b| b.iter(|| black_box(&double).to_string()));
}

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_fields");

    for depth in [1usize, 4, 16] {
        let mut registry = TypeRegistry::new();
        let mut ty = registry.root();
        for level in 0..depth {
            ty = registry.define_type(format!("Level{}", level), Some(ty)).unwrap();
            registry
                .add_field(ty, format!("f{}", level), HostModifiers::PUBLIC)
                .unwrap()
                .add_field(ty, format!("S{}", level), HostModifiers::PUBLIC | HostModifiers::STATIC)
                .unwrap();
        }

        group.bench_with_input(BenchmarkId::new("depth", depth), &ty, |b, &leaf| {
            b.iter(|| {
                corshim_engine::collect_members(
                    &registry,
                    BindingFlags::PUBLIC | BindingFlags::STATIC,
                    black_box(leaf),
                    MemberTypes::FIELD,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_get_set,
    bench_volatile,
    bench_hash_and_text,
    bench_enumeration
);
criterion_main!(benches);
