//! Introspection document rendering
//!
//! Produces the standard introspection XML for one object:
//!
//! ```text
//! <!DOCTYPE node PUBLIC ...>
//! <node name="/com/example/Widget">
//!   <interface name="com.example.Widget">
//!     <method .../>                                  (from the dispatch table)
//!     <property name="color" type="s" access="readwrite"/>
//!   </interface>
//!   <node name="child"/>
//! </node>
//! ```
//!
//! Method and signal fragments are rendered by the connection's reflection
//! callbacks and inserted verbatim. Properties follow them, sorted by name.

use super::access::AccessMode;
use std::collections::BTreeMap;

/// Document type declaration that opens every introspection document.
pub const INTROSPECT_DOCTYPE: &str = "<!DOCTYPE node PUBLIC \"-//freedesktop//DTD D-BUS Object Introspection 1.0//EN\"\n\"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd\">\n";

/// What introspection needs to know about one property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub signature: String,
    pub access: AccessMode,
}

impl PropertyInfo {
    /// Render the `<property>` element.
    #[must_use]
    pub fn reflect(&self) -> String {
        format!(
            "    <property name=\"{}\" type=\"{}\" access=\"{}\"/>\n",
            self.name, self.signature, self.access
        )
    }
}

/// Everything exported under one interface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterfaceDescription {
    /// Pre-rendered method and signal fragments, in registration order.
    pub members: Vec<String>,
    pub properties: Vec<PropertyInfo>,
}

/// An object's introspection data, ready to render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectDescription {
    pub interfaces: BTreeMap<String, InterfaceDescription>,
    pub children: Vec<String>,
}

impl ObjectDescription {
    /// Add pre-rendered member fragments for `interface`.
    pub fn add_members(&mut self, interface: &str, fragments: Vec<String>) {
        self.interfaces
            .entry(interface.to_string())
            .or_default()
            .members
            .extend(fragments);
    }

    /// Add one property to `interface`.
    pub fn add_property(&mut self, interface: &str, property: PropertyInfo) {
        self.interfaces
            .entry(interface.to_string())
            .or_default()
            .properties
            .push(property);
    }

    /// Render the document for `object_path`.
    #[must_use]
    pub fn render(&self, object_path: &str) -> String {
        let mut xml = String::from(INTROSPECT_DOCTYPE);
        xml.push_str(&format!("<node name=\"{}\">\n", object_path));

        for (name, interface) in &self.interfaces {
            xml.push_str(&format!("  <interface name=\"{}\">\n", name));
            for fragment in &interface.members {
                xml.push_str(fragment);
            }
            let mut properties: Vec<_> = interface.properties.iter().collect();
            properties.sort_by(|a, b| a.name.cmp(&b.name));
            for property in properties {
                xml.push_str(&property.reflect());
            }
            xml.push_str("  </interface>\n");
        }

        for child in &self.children {
            xml.push_str(&format!("  <node name=\"{}\"/>\n", child));
        }
        xml.push_str("</node>\n");
        xml
    }
}
