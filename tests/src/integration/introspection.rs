//! # Introspection
//!
//! The document served by `Introspect` over the connection: registered
//! members rendered by the dispatch table, properties from the index, and
//! direct children, reflecting live registration state.

#[cfg(test)]
mod tests {
    use crate::fixtures::{exporter, path, widget_at, Gadget, Widget, WIDGET_IFACE};
    use bus_connection::MethodInfo;
    use bus_properties::{IntrospectableApi, PropertiesApi};
    use bus_types::{BusError, Value, INTROSPECTABLE_IFACE};
    use std::sync::Arc;

    const EXPECTED_WIDGET: &str = r#"<!DOCTYPE node PUBLIC "-//freedesktop//DTD D-BUS Object Introspection 1.0//EN"
"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd">
<node name="/com/example/Widget">
  <interface name="com.example.Widget">
    <property name="color" type="s" access="readwrite"/>
  </interface>
  <interface name="org.freedesktop.DBus.Introspectable">
    <method name="Introspect">
      <arg direction="out" type="s" />
    </method>
  </interface>
  <interface name="org.freedesktop.DBus.Properties">
    <method name="Get">
      <arg direction="in"  type="s" name="interface_name" />
      <arg direction="in"  type="s" name="property_name" />
      <arg direction="out" type="v" />
    </method>
    <method name="Set">
      <arg direction="in"  type="s" name="interface_name" />
      <arg direction="in"  type="s" name="property_name" />
      <arg direction="in"  type="v" name="value" />
    </method>
    <method name="GetAll">
      <arg direction="in"  type="s" name="interface_name" />
      <arg direction="out" type="a{sv}" />
    </method>
    <signal name="PropertiesChanged">
      <arg type="s" name="interface_name" />
      <arg type="a{sv}" name="changed_properties" />
      <arg type="as" name="invalidated_properties" />
    </signal>
  </interface>
  <node name="Part"/>
  <node name="deep"/>
</node>
"#;

    fn introspect_over_wire(exporter: &bus_properties::BusExporter, at: &str) -> String {
        let reply = exporter
            .connection()
            .call(&path(at), INTROSPECTABLE_IFACE, "Introspect", &[])
            .unwrap();
        reply[0].as_str().unwrap().to_string()
    }

    #[test]
    fn test_full_document() {
        let exporter = exporter();
        widget_at(&exporter, "/com/example/Widget", "red");
        exporter
            .export(path("/com/example/Widget/Part"), Arc::new(Gadget::new(1)))
            .unwrap();
        widget_at(&exporter, "/com/example/Widget/deep/leaf", "green");

        assert_eq!(introspect_over_wire(&exporter, "/com/example/Widget"), EXPECTED_WIDGET);
    }

    #[test]
    fn test_document_tracks_live_registrations() {
        let exporter = exporter();
        widget_at(&exporter, "/w", "red");

        assert!(!introspect_over_wire(&exporter, "/w").contains("<node name=\"child\"/>"));

        widget_at(&exporter, "/w/child", "blue");
        assert!(introspect_over_wire(&exporter, "/w").contains("  <node name=\"child\"/>\n"));

        exporter.unexport(&path("/w/child"));
        assert!(!introspect_over_wire(&exporter, "/w").contains("<node name=\"child\"/>"));
    }

    #[test]
    fn test_custom_methods_precede_properties() {
        let exporter = exporter();
        let widget = widget_at(&exporter, "/w", "red");
        let target = Arc::clone(&widget);
        exporter.connection().register_method(
            &path("/w"),
            MethodInfo::new(WIDGET_IFACE, "Paint", "s", "", &["color"]),
            Arc::new(move |args: &[Value]| {
                target
                    .set(WIDGET_IFACE, "color", args[0].clone())
                    .map(|_| Vec::new())
                    .map_err(BusError::from)
            }),
        );

        let xml = widget.introspect(&path("/w")).unwrap();
        let expected = concat!(
            "  <interface name=\"com.example.Widget\">\n",
            "    <method name=\"Paint\">\n",
            "      <arg direction=\"in\"  type=\"s\" name=\"color\" />\n",
            "    </method>\n",
            "    <property name=\"color\" type=\"s\" access=\"readwrite\"/>\n",
            "  </interface>\n",
        );
        assert!(xml.contains(expected), "{}", xml);

        exporter
            .connection()
            .call(&path("/w"), WIDGET_IFACE, "Paint", &[Value::from("teal")])
            .unwrap();
        assert_eq!(widget.object().color(), "teal");
    }

    #[test]
    fn test_method_only_interface() {
        let exporter = exporter();
        let widget = widget_at(&exporter, "/w", "red");
        exporter.connection().register_method(
            &path("/w"),
            MethodInfo::new("com.example.Pokeable", "Poke", "", "", &[]),
            Arc::new(|_: &[Value]| Ok::<_, BusError>(Vec::new())),
        );

        assert!(widget.get_all("com.example.Pokeable").unwrap().is_empty());
        assert!(widget
            .interfaces()
            .contains(&"com.example.Pokeable".to_string()));
        assert_eq!(widget.property_interfaces(), vec![WIDGET_IFACE]);
    }

    #[test]
    fn test_empty_object() {
        let exporter = exporter();
        let empty = exporter
            .export(path("/empty"), Arc::new(bus_properties::ObjectManager::new()))
            .unwrap();
        let xml = empty.introspect(&path("/empty")).unwrap();
        assert!(xml.starts_with("<!DOCTYPE node PUBLIC"));
        assert!(xml.contains("<node name=\"/empty\">\n"));
        assert!(!xml.contains("<property"));
    }
}
