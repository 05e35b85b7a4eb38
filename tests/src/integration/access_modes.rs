//! # Access Modes
//!
//! Getter-only, setter-only and read-write properties, and renamed
//! properties on a second interface.

#[cfg(test)]
mod tests {
    use crate::fixtures::{exporter, path, Gadget, GADGET_IFACE, VERSIONED_IFACE};
    use bus_properties::{AccessMode, PropertiesApi, PropertyError};
    use bus_types::{error_names, Value, PROPERTIES_IFACE};
    use std::sync::Arc;

    #[test]
    fn test_getter_only_is_not_writable() {
        let exporter = exporter();
        let gadget = exporter.export(path("/g"), Arc::new(Gadget::new(42))).unwrap();

        assert_eq!(gadget.get(GADGET_IFACE, "serial").unwrap(), Value::from(42u32));
        let err = gadget
            .set(GADGET_IFACE, "serial", Value::from(7u32))
            .unwrap_err();
        assert!(matches!(err, PropertyError::NotWritable { .. }));
        assert_eq!(gadget.get(GADGET_IFACE, "serial").unwrap(), Value::from(42u32));
    }

    #[test]
    fn test_setter_only_is_not_readable() {
        let exporter = exporter();
        let gadget = exporter.export(path("/g"), Arc::new(Gadget::new(1))).unwrap();

        gadget.set(GADGET_IFACE, "pin", Value::from("1234")).unwrap();
        assert_eq!(gadget.object().pin().as_deref(), Some("1234"));

        let err = gadget.get(GADGET_IFACE, "pin").unwrap_err();
        assert!(matches!(err, PropertyError::NotReadable { .. }));
    }

    #[test]
    fn test_access_errors_on_the_wire() {
        let exporter = exporter();
        exporter.export(path("/g"), Arc::new(Gadget::new(1))).unwrap();
        let conn = exporter.connection();

        let err = conn
            .call(
                &path("/g"),
                PROPERTIES_IFACE,
                "Set",
                &[
                    Value::from(GADGET_IFACE),
                    Value::from("serial"),
                    Value::from(9u32).into_variant(),
                ],
            )
            .unwrap_err();
        assert!(err.is(error_names::PROPERTY_READ_ONLY));

        let err = conn
            .call(
                &path("/g"),
                PROPERTIES_IFACE,
                "Get",
                &[Value::from(GADGET_IFACE), Value::from("pin")],
            )
            .unwrap_err();
        assert!(err.is(error_names::ACCESS_DENIED));
    }

    #[test]
    fn test_get_all_per_interface() {
        let exporter = exporter();
        let gadget = exporter.export(path("/g"), Arc::new(Gadget::new(5))).unwrap();
        gadget.set(GADGET_IFACE, "label", Value::from("kitchen")).unwrap();

        let all = gadget.get_all(GADGET_IFACE).unwrap();
        let keys: Vec<_> = all.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["label", "serial"]);
        assert_eq!(all["label"], Value::from("kitchen"));

        let versioned = gadget.get_all(VERSIONED_IFACE).unwrap();
        let keys: Vec<_> = versioned.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Version"]);
    }

    #[test]
    fn test_explicit_name_replaces_slot_name() {
        let exporter = exporter();
        let gadget = exporter.export(path("/g"), Arc::new(Gadget::new(5))).unwrap();

        gadget.set(VERSIONED_IFACE, "Version", Value::from(3u32)).unwrap();
        assert_eq!(gadget.get(VERSIONED_IFACE, "Version").unwrap(), Value::from(3u32));
        assert!(matches!(
            gadget.get(VERSIONED_IFACE, "version"),
            Err(PropertyError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_index_reports_access_modes() {
        let exporter = exporter();
        let gadget = exporter.export(path("/g"), Arc::new(Gadget::new(5))).unwrap();
        let index = gadget.index();

        assert_eq!(index.len(), 4);
        assert_eq!(index.lookup(GADGET_IFACE, "serial").unwrap().access(), AccessMode::Read);
        assert_eq!(index.lookup(GADGET_IFACE, "pin").unwrap().access(), AccessMode::Write);
        assert_eq!(
            index.lookup(GADGET_IFACE, "label").unwrap().access(),
            AccessMode::ReadWrite
        );
    }
}
