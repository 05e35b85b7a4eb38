//! # Failures
//!
//! - Unexpected accessor failures: sanitized reply, full cause in the
//!   server-side log
//! - Deliberate bus errors from accessors cross unchanged
//! - Declaration defects fail the export and register nothing

#[cfg(test)]
mod tests {
    use crate::fixtures::{path, Sensor, OUT_OF_RANGE, SENSOR_IFACE};
    use bus_properties::{
        Accessor, BusExporter, BusObject, ConfigurationError, PropertiesApi, PropertiesConfig,
        Property, PropertyDescriptor, PropertyError, PropertySet,
    };
    use bus_telemetry::LogCapture;
    use bus_types::{error_names, Value, PROPERTIES_IFACE};
    use std::sync::Arc;

    fn sensor_exporter(sanitize: bool) -> BusExporter {
        let config = PropertiesConfig::default().with_sanitize_accessor_errors(sanitize);
        let exporter = BusExporter::connect(config).unwrap();
        exporter
            .export(path("/sensor"), Arc::new(Sensor::new()))
            .unwrap();
        exporter
    }

    fn get_reading(exporter: &BusExporter) -> bus_types::BusError {
        exporter
            .connection()
            .call(
                &path("/sensor"),
                PROPERTIES_IFACE,
                "Get",
                &[Value::from(SENSOR_IFACE), Value::from("reading")],
            )
            .unwrap_err()
    }

    #[test]
    fn test_failing_getter_is_logged_and_sanitized() {
        let exporter = sensor_exporter(true);
        let capture = LogCapture::new();

        let err = tracing::subscriber::with_default(capture.subscriber(), || get_reading(&exporter));

        assert!(err.is(error_names::FAILED));
        assert_eq!(err.message, "Unable to get property com.example.Sensor:reading");
        assert!(!err.message.contains("i2c"));

        assert!(capture.contains("ERROR"), "{}", capture.contents());
        assert!(capture.contains("Runaway error from Get"));
        assert!(capture.contains("i2c bus timeout after 250ms"));
        assert_eq!(exporter.metrics().snapshot().accessor_failures, 1);
    }

    #[test]
    fn test_unsanitized_reply_carries_cause() {
        let exporter = sensor_exporter(false);
        let err = get_reading(&exporter);

        assert!(err.is(error_names::FAILED));
        assert!(err.message.starts_with("Unable to get property com.example.Sensor:reading: "));
        assert!(err.message.contains("i2c bus timeout"));
    }

    #[test]
    fn test_get_all_fails_as_a_whole() {
        let exporter = BusExporter::connect(PropertiesConfig::default()).unwrap();
        let sensor = exporter
            .export(path("/sensor"), Arc::new(Sensor::new()))
            .unwrap();

        let err = sensor.get_all(SENSOR_IFACE).unwrap_err();
        assert!(err.is_accessor_failure());
        assert_eq!(sensor.get(SENSOR_IFACE, "calibration").unwrap(), Value::from(1.0));
    }

    #[test]
    fn test_deliberate_error_crosses_unchanged() {
        let exporter = sensor_exporter(true);
        let capture = LogCapture::new();

        let err = tracing::subscriber::with_default(capture.subscriber(), || {
            exporter
                .connection()
                .call(
                    &path("/sensor"),
                    PROPERTIES_IFACE,
                    "Set",
                    &[
                        Value::from(SENSOR_IFACE),
                        Value::from("calibration"),
                        Value::from(5.0).into_variant(),
                    ],
                )
                .unwrap_err()
        });

        assert!(err.is(OUT_OF_RANGE));
        assert_eq!(err.message, "calibration 5 outside 0.5..=2.0");
        assert!(!capture.contains("ERROR"));

        let snapshot = exporter.metrics().snapshot();
        assert_eq!(snapshot.protocol_errors, 1);
        assert_eq!(snapshot.accessor_failures, 0);
    }

    #[test]
    fn test_lookup_errors_are_never_accessor_failures() {
        let exporter = BusExporter::connect(PropertiesConfig::default()).unwrap();
        let sensor = exporter
            .export(path("/sensor"), Arc::new(Sensor::new()))
            .unwrap();

        for err in [
            sensor.get(SENSOR_IFACE, "humidity").unwrap_err(),
            sensor.get("com.example.Nope", "reading").unwrap_err(),
        ] {
            assert!(err.is_client_error());
            assert!(!err.is_accessor_failure());
        }
    }

    struct Clashing;

    impl BusObject for Clashing {
        fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
            props
                .add(Property::decorate(
                    PropertyDescriptor::new("s", "com.example.Clash").named("Name"),
                    "first",
                    Accessor::getter(|_: &Clashing| Ok(Value::from("a"))),
                )?)?
                .add(Property::decorate(
                    PropertyDescriptor::new("s", "com.example.Clash").named("Name"),
                    "second",
                    Accessor::getter(|_: &Clashing| Ok(Value::from("b"))),
                )?)?;
            Ok(())
        }
    }

    struct BadInterface;

    impl BusObject for BadInterface {
        fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
            props.add(Property::decorate(
                PropertyDescriptor::new("s", "nodots"),
                "value",
                Accessor::getter(|_: &BadInterface| Ok(Value::from("x"))),
            )?)?;
            Ok(())
        }
    }

    #[test]
    fn test_name_collision_fails_export() {
        let exporter = BusExporter::connect(PropertiesConfig::default()).unwrap();

        let err = exporter.export(path("/clash"), Arc::new(Clashing)).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NameCollision { ref first, ref second, .. }
                if first == "first" && second == "second"
        ));
        assert!(!exporter.connection().is_registered(&path("/clash")));

        // Not cached: every attempt reports the defect.
        assert!(exporter.export(path("/clash"), Arc::new(Clashing)).is_err());
    }

    #[test]
    fn test_invalid_interface_name_fails_export() {
        let exporter = BusExporter::connect(PropertiesConfig::default()).unwrap();
        let err = exporter
            .export(path("/bad"), Arc::new(BadInterface))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidName(_)));
    }

    #[test]
    fn test_accessor_role_mismatch() {
        let result = Property::decorate(
            PropertyDescriptor::new("s", "com.example.Role").setter(),
            "value",
            Accessor::getter(|_: &BadInterface| Ok(Value::from("x"))),
        );
        assert!(matches!(result, Err(ConfigurationError::AccessorRole { .. })));
    }
}
