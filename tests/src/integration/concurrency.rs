//! # Concurrency
//!
//! The per-type index is built once even when many threads export the same
//! type at the same moment, and Get/Set may run concurrently on one object.

#[cfg(test)]
mod tests {
    use crate::fixtures::{exporter, path, widget_at, Widget, WIDGET_IFACE};
    use bus_properties::{
        Accessor, BusObject, ConfigurationError, PropertiesApi, Property, PropertyDescriptor,
        PropertyRegistry, PropertySet,
    };
    use bus_types::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    static PROBE_DECLARATIONS: AtomicUsize = AtomicUsize::new(0);

    /// Only exported by `test_concurrent_first_export_builds_once`.
    struct Probe;

    impl BusObject for Probe {
        fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
            PROBE_DECLARATIONS.fetch_add(1, Ordering::SeqCst);
            // Widen the race window.
            thread::sleep(std::time::Duration::from_millis(20));
            props.add(Property::decorate(
                PropertyDescriptor::new("b", "com.example.Probe"),
                "alive",
                Accessor::getter(|_: &Probe| Ok(Value::from(true))),
            )?)?;
            Ok(())
        }
    }

    #[test]
    fn test_concurrent_first_export_builds_once() {
        let exporter = Arc::new(exporter());
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let exporter = Arc::clone(&exporter);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    exporter
                        .export(path(&format!("/probe/p{}", i)), Arc::new(Probe))
                        .unwrap()
                })
            })
            .collect();

        let exported: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(PROBE_DECLARATIONS.load(Ordering::SeqCst), 1);
        let first = exported[0].index();
        assert!(exported.iter().all(|e| Arc::ptr_eq(e.index(), first)));
        assert!(PropertyRegistry::global().contains::<Probe>());
    }

    #[test]
    fn test_index_identity_survives_more_instances() {
        let exporter = exporter();
        let before = PropertyRegistry::global().get_or_build::<Widget>().unwrap();

        for i in 0..10 {
            widget_at(&exporter, &format!("/w/w{}", i), "red");
        }

        let after = PropertyRegistry::global().get_or_build::<Widget>().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_and_set() {
        let exporter = exporter();
        let widget = widget_at(&exporter, "/w", "red");

        let mut tasks = Vec::new();
        for i in 0..32 {
            let widget = Arc::clone(&widget);
            tasks.push(tokio::task::spawn_blocking(move || {
                if i % 2 == 0 {
                    widget
                        .set(WIDGET_IFACE, "color", Value::from(format!("c{}", i)))
                        .unwrap();
                } else {
                    let value = widget.get(WIDGET_IFACE, "color").unwrap();
                    assert!(value.as_str().is_some());
                }
            }));
        }
        for task in futures::future::join_all(tasks).await {
            task.unwrap();
        }

        let color = widget.object().color();
        assert!(color == "red" || color.starts_with('c'));
        assert_eq!(exporter.metrics().snapshot().sets, 16);
        assert_eq!(exporter.metrics().snapshot().gets, 16);
    }
}
