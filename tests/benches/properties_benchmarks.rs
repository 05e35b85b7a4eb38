//! # Bus Properties Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | Index lookup after first build | O(log n), no rebuild |
//! | `Get` on an exported object | One map lookup plus the getter |
//! | `GetAll` | Linear in readable properties of the interface |
//! | `Introspect` | Linear in members and properties |
//! | Wire `Get` | Direct call plus dispatch and variant wrapping |

#![allow(clippy::unwrap_used)]

use bus_connection::InMemoryConnection;
use bus_properties::{
    BusObject, ConfigurationError, ExportedObject, IntrospectableApi, ObjectBus, PropertiesApi,
    PropertiesConfig, Property, PropertyDescriptor, PropertyIndex, PropertyMetrics,
    PropertyRegistry, PropertySet,
};
use bus_tests::fixtures::{exporter, path, widget_at, Gadget, Widget, GADGET_IFACE, WIDGET_IFACE};
use bus_types::{ObjectPath, Value, PROPERTIES_IFACE};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::{Arc, Weak};
use std::time::Duration;

// ============================================================================
// Index
// ============================================================================

fn bench_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    let registry = PropertyRegistry::global();
    registry.get_or_build::<Gadget>().unwrap();

    group.bench_function("get_or_build_cached", |b| {
        b.iter(|| black_box(registry.get_or_build::<Gadget>().unwrap()))
    });

    let index = registry.get_or_build::<Gadget>().unwrap();
    group.bench_function("lookup", |b| {
        b.iter(|| black_box(index.lookup(GADGET_IFACE, "label").is_ok()))
    });

    group.finish();
}

// ============================================================================
// Properties interface
// ============================================================================

fn bench_get_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("properties");
    let exporter = exporter();
    let widget = widget_at(&exporter, "/bench/widget", "red");

    group.bench_function("get", |b| {
        b.iter(|| black_box(widget.get(WIDGET_IFACE, "color").unwrap()))
    });

    group.bench_function("set", |b| {
        b.iter(|| {
            widget
                .set(WIDGET_IFACE, "color", Value::from("blue"))
                .unwrap()
        })
    });

    group.bench_function("get_unknown_property", |b| {
        b.iter(|| black_box(widget.get(WIDGET_IFACE, "size").is_err()))
    });

    group.finish();
}

/// Holds `n` readable numbers on one interface.
struct Bag(Vec<u32>);

impl BusObject for Bag {
    fn declare_properties(_props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
        Ok(())
    }
}

fn bag(n: usize) -> ExportedObject<Bag> {
    let properties = (0..n)
        .map(|i| {
            Property::unbound(
                PropertyDescriptor::new("u", "com.example.Bag"),
                format!("p{}", i),
            )
            .bind_getter(move |b: &Bag| Ok::<_, anyhow::Error>(Value::from(b.0[i])))
        })
        .collect();
    let index = PropertyIndex::from_properties("Bag", properties).unwrap();
    let bus: Weak<dyn ObjectBus> = Weak::<InMemoryConnection>::new();
    ExportedObject::with_index(
        ObjectPath::new("/bench/bag").unwrap(),
        Arc::new(Bag((0..n as u32).collect())),
        Arc::new(index),
        bus,
        PropertiesConfig::default(),
        Arc::new(PropertyMetrics::new()),
    )
}

fn bench_get_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_all");

    for size in [1usize, 16, 128] {
        let object = bag(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("readable", size), &object, |b, object| {
            b.iter(|| black_box(object.get_all("com.example.Bag").unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Introspection and wire calls
// ============================================================================

fn bench_introspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("introspect");
    let exporter = exporter();
    let gadget = exporter
        .export(path("/bench/gadget"), Arc::new(Gadget::new(7)))
        .unwrap();
    for i in 0..8 {
        widget_at(&exporter, &format!("/bench/gadget/w{}", i), "red");
    }

    group.bench_function("gadget_with_children", |b| {
        b.iter(|| black_box(gadget.introspect(gadget.object_path()).unwrap()))
    });

    group.finish();
}

fn bench_wire_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire");
    group.measurement_time(Duration::from_secs(5));

    let exporter = exporter();
    exporter
        .export(path("/bench/wire"), Arc::new(Widget::new("red")))
        .unwrap();
    let conn = exporter.connection();
    let target = path("/bench/wire");
    let args = [Value::from(WIDGET_IFACE), Value::from("color")];

    group.bench_function("get", |b| {
        b.iter(|| black_box(conn.call(&target, PROPERTIES_IFACE, "Get", &args).unwrap()))
    });

    let all = [Value::from(WIDGET_IFACE)];
    group.bench_function("get_all", |b| {
        b.iter(|| black_box(conn.call(&target, PROPERTIES_IFACE, "GetAll", &all).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_registry_lookup,
    bench_get_set,
    bench_get_all,
    bench_introspect,
    bench_wire_calls,
);
criterion_main!(benches);
