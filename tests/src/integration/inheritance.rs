//! # Inheritance
//!
//! A type embedding a base object inherits its properties. Own declarations
//! in the same slot override inherited ones.

#[cfg(test)]
mod tests {
    use crate::fixtures::{exporter, path};
    use bus_properties::{
        Accessor, BusObject, ConfigurationError, PropertiesApi, Property, PropertyDescriptor,
        PropertyRegistry, PropertySet,
    };
    use bus_types::Value;
    use parking_lot::RwLock;
    use std::sync::Arc;

    const DEVICE_IFACE: &str = "com.example.Device";
    const SMART_IFACE: &str = "com.example.SmartDevice";

    struct Device {
        name: RwLock<String>,
        vendor: String,
    }

    impl Device {
        fn new(name: &str) -> Self {
            Self {
                name: RwLock::new(name.to_string()),
                vendor: "Acme".to_string(),
            }
        }
    }

    impl BusObject for Device {
        fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
            props
                .add(
                    Property::decorate(
                        PropertyDescriptor::new("s", DEVICE_IFACE),
                        "name",
                        Accessor::getter(|d: &Device| Ok(Value::from(d.name.read().clone()))),
                    )?
                    .bind_setter(|d: &Device, v: Value| {
                        *d.name.write() = String::try_from(v)?;
                        Ok(())
                    }),
                )?
                .add(Property::decorate(
                    PropertyDescriptor::new("s", DEVICE_IFACE),
                    "vendor",
                    Accessor::getter(|d: &Device| Ok(Value::from(d.vendor.as_str()))),
                )?)?;
            Ok(())
        }
    }

    struct SmartDevice {
        device: Device,
        firmware: String,
    }

    impl BusObject for SmartDevice {
        fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
            props
                .add(Property::decorate(
                    PropertyDescriptor::new("s", SMART_IFACE),
                    "firmware",
                    Accessor::getter(|s: &SmartDevice| Ok(Value::from(s.firmware.as_str()))),
                )?)?
                // Overrides the base's `vendor` slot, moving it to this interface.
                .add(Property::decorate(
                    PropertyDescriptor::new("s", SMART_IFACE),
                    "vendor",
                    Accessor::getter(|_: &SmartDevice| Ok(Value::from("Acme Smart"))),
                )?)?
                .inherit::<Device>(|s: &SmartDevice| &s.device)?;
            Ok(())
        }
    }

    fn smart() -> Arc<SmartDevice> {
        Arc::new(SmartDevice {
            device: Device::new("thermostat"),
            firmware: "2.1.0".to_string(),
        })
    }

    #[test]
    fn test_inherited_property_reads_through_base() {
        let exporter = exporter();
        let device = exporter.export(path("/d"), smart()).unwrap();

        assert_eq!(
            device.get(DEVICE_IFACE, "name").unwrap(),
            Value::from("thermostat")
        );
        device.set(DEVICE_IFACE, "name", Value::from("hallway")).unwrap();
        assert_eq!(*device.object().device.name.read(), "hallway");
    }

    #[test]
    fn test_own_slot_overrides_inherited() {
        let exporter = exporter();
        let device = exporter.export(path("/d"), smart()).unwrap();

        let base = device.get_all(DEVICE_IFACE).unwrap();
        let keys: Vec<_> = base.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name"]);

        let own = device.get_all(SMART_IFACE).unwrap();
        assert_eq!(own["vendor"], Value::from("Acme Smart"));
        assert_eq!(own["firmware"], Value::from("2.1.0"));
    }

    #[test]
    fn test_base_and_derived_have_separate_indexes() {
        let registry = PropertyRegistry::global();
        let base = registry.get_or_build::<Device>().unwrap();
        let derived = registry.get_or_build::<SmartDevice>().unwrap();

        assert_eq!(base.len(), 2);
        assert_eq!(derived.len(), 3);
        assert!(base.interface(SMART_IFACE).is_none());
    }
}
