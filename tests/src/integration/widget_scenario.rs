//! # Widget Scenario
//!
//! A `Widget` exported at `/com/example/Widget` with one read-write `color`
//! property under `com.example.Widget`:
//!
//! 1. `Get` returns the initial colour
//! 2. `Set` then `Get` round-trips
//! 3. `GetAll` returns exactly `{color}`
//! 4. Unknown property and unknown interface map to their own errors

#[cfg(test)]
mod tests {
    use crate::fixtures::{exporter, path, widget_at, WIDGET_IFACE};
    use bus_properties::{PropertiesApi, PropertyError};
    use bus_types::{error_names, Value, PROPERTIES_IFACE};

    #[test]
    fn test_widget_scenario_typed() {
        let exporter = exporter();
        let widget = widget_at(&exporter, "/com/example/Widget", "red");

        assert_eq!(widget.get(WIDGET_IFACE, "color").unwrap(), Value::from("red"));

        widget.set(WIDGET_IFACE, "color", Value::from("blue")).unwrap();
        assert_eq!(widget.get(WIDGET_IFACE, "color").unwrap(), Value::from("blue"));
        assert_eq!(widget.object().color(), "blue");

        let all = widget.get_all(WIDGET_IFACE).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["color"], Value::from("blue"));

        assert!(matches!(
            widget.get(WIDGET_IFACE, "size"),
            Err(PropertyError::UnknownProperty { ref property, .. }) if property == "size"
        ));
        assert!(matches!(
            widget.get("com.example.Other", "color"),
            Err(PropertyError::UnknownInterface { ref interface }) if interface == "com.example.Other"
        ));
    }

    #[test]
    fn test_widget_scenario_over_the_wire() {
        let exporter = exporter();
        widget_at(&exporter, "/com/example/Widget", "red");
        let conn = exporter.connection();
        let at = path("/com/example/Widget");

        conn.call(
            &at,
            PROPERTIES_IFACE,
            "Set",
            &[
                Value::from(WIDGET_IFACE),
                Value::from("color"),
                Value::from("blue").into_variant(),
            ],
        )
        .unwrap();

        let reply = conn
            .call(&at, PROPERTIES_IFACE, "GetAll", &[Value::from(WIDGET_IFACE)])
            .unwrap();
        let all = reply[0].as_dict().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["color"].clone().into_inner(), Value::from("blue"));

        let err = conn
            .call(
                &at,
                PROPERTIES_IFACE,
                "Get",
                &[Value::from(WIDGET_IFACE), Value::from("size")],
            )
            .unwrap_err();
        assert!(err.is(error_names::UNKNOWN_PROPERTY));
        assert!(err.message.contains("size"));

        let err = conn
            .call(
                &at,
                PROPERTIES_IFACE,
                "Get",
                &[Value::from("com.example.Other"), Value::from("color")],
            )
            .unwrap_err();
        assert!(err.is(error_names::UNKNOWN_INTERFACE));
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let exporter = exporter();
        let a = widget_at(&exporter, "/w/a", "red");
        let b = widget_at(&exporter, "/w/b", "green");

        a.set(WIDGET_IFACE, "color", Value::from("blue")).unwrap();

        assert_eq!(a.get(WIDGET_IFACE, "color").unwrap(), Value::from("blue"));
        assert_eq!(b.get(WIDGET_IFACE, "color").unwrap(), Value::from("green"));
    }

    #[test]
    fn test_wrong_argument_types_are_invalid_args() {
        let exporter = exporter();
        widget_at(&exporter, "/w", "red");

        let err = exporter
            .connection()
            .call(&path("/w"), PROPERTIES_IFACE, "Get", &[Value::from(WIDGET_IFACE)])
            .unwrap_err();
        assert!(err.is(error_names::INVALID_ARGS));
    }
}
