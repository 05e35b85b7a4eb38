//! # Dispatch Table
//!
//! Per-object registration of methods and signals, grouped by interface, and
//! the reflection callback that renders each member for introspection.
//!
//! Rendering follows the layout emitted by dbus-python so that existing
//! peers parsing the document see the same structure:
//!
//! ```text
//!     <method name="Get">
//!       <arg direction="in"  type="s" name="interface_name" />
//!       <arg direction="in"  type="s" name="property_name" />
//!       <arg direction="out" type="v" />
//!     </method>
//! ```

use bus_types::{split_signature, BusError, SignatureError, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Handler invoked for a method call. Receives the call arguments and
/// returns the reply body.
pub type MethodHandler = Arc<dyn Fn(&[Value]) -> Result<Vec<Value>, BusError> + Send + Sync>;

/// Static description of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Interface the method belongs to.
    pub interface: String,
    /// Method name.
    pub name: String,
    /// Input signature.
    pub in_signature: String,
    /// Output signature.
    pub out_signature: String,
    /// Names of the input arguments, in order.
    pub arg_names: Vec<String>,
}

impl MethodInfo {
    /// Describe a method.
    pub fn new(
        interface: impl Into<String>,
        name: impl Into<String>,
        in_signature: impl Into<String>,
        out_signature: impl Into<String>,
        arg_names: &[&str],
    ) -> Self {
        Self {
            interface: interface.into(),
            name: name.into(),
            in_signature: in_signature.into(),
            out_signature: out_signature.into(),
            arg_names: arg_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Render the `<method>` element.
    pub fn reflect(&self) -> Result<String, SignatureError> {
        let in_types = split_signature(&self.in_signature)?;
        let out_types = split_signature(&self.out_signature)?;

        let mut xml = format!("    <method name=\"{}\">\n", self.name);
        for (ty, name) in in_types.iter().zip(self.arg_names.iter()) {
            xml.push_str(&format!(
                "      <arg direction=\"in\"  type=\"{}\" name=\"{}\" />\n",
                ty, name
            ));
        }
        for ty in &out_types {
            xml.push_str(&format!("      <arg direction=\"out\" type=\"{}\" />\n", ty));
        }
        xml.push_str("    </method>\n");
        Ok(xml)
    }
}

/// Static description of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalInfo {
    /// Interface the signal belongs to.
    pub interface: String,
    /// Signal name.
    pub name: String,
    /// Body signature.
    pub signature: String,
    /// Names of the body arguments, in order.
    pub arg_names: Vec<String>,
}

impl SignalInfo {
    /// Describe a signal.
    pub fn new(
        interface: impl Into<String>,
        name: impl Into<String>,
        signature: impl Into<String>,
        arg_names: &[&str],
    ) -> Self {
        Self {
            interface: interface.into(),
            name: name.into(),
            signature: signature.into(),
            arg_names: arg_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Render the `<signal>` element.
    pub fn reflect(&self) -> Result<String, SignatureError> {
        let types = split_signature(&self.signature)?;

        let mut xml = format!("    <signal name=\"{}\">\n", self.name);
        for (ty, name) in types.iter().zip(self.arg_names.iter()) {
            xml.push_str(&format!("      <arg type=\"{}\" name=\"{}\" />\n", ty, name));
        }
        xml.push_str("    </signal>\n");
        Ok(xml)
    }
}

/// A registered member.
#[derive(Clone)]
pub enum Member {
    Method {
        info: MethodInfo,
        handler: MethodHandler,
    },
    Signal(SignalInfo),
}

impl Member {
    /// Member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method { info, .. } => &info.name,
            Self::Signal(info) => &info.name,
        }
    }

    /// Interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        match self {
            Self::Method { info, .. } => &info.interface,
            Self::Signal(info) => &info.interface,
        }
    }

    /// Reflection callback: render this member's introspection fragment.
    pub fn reflect(&self) -> Result<String, SignatureError> {
        match self {
            Self::Method { info, .. } => info.reflect(),
            Self::Signal(info) => info.reflect(),
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method { info, .. } => f.debug_struct("Method").field("info", info).finish(),
            Self::Signal(info) => f.debug_tuple("Signal").field(info).finish(),
        }
    }
}

/// Members registered at one object path, grouped by interface.
///
/// Within an interface, members keep registration order; re-registering a
/// member of the same kind and name replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    interfaces: BTreeMap<String, Vec<Member>>,
}

impl DispatchTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method.
    pub fn add_method(&mut self, info: MethodInfo, handler: MethodHandler) {
        let interface = info.interface.clone();
        self.insert(interface, Member::Method { info, handler });
    }

    /// Register a signal.
    pub fn add_signal(&mut self, info: SignalInfo) {
        let interface = info.interface.clone();
        self.insert(interface, Member::Signal(info));
    }

    fn insert(&mut self, interface: String, member: Member) {
        let members = self.interfaces.entry(interface).or_default();
        let same_kind = |existing: &Member| {
            matches!(
                (existing, &member),
                (Member::Method { .. }, Member::Method { .. }) | (Member::Signal(_), Member::Signal(_))
            )
        };
        match members
            .iter()
            .position(|m| m.name() == member.name() && same_kind(m))
        {
            Some(idx) => members[idx] = member,
            None => members.push(member),
        }
    }

    /// Look up a method handler.
    pub fn method(&self, interface: &str, name: &str) -> Result<(&MethodInfo, &MethodHandler), BusError> {
        let members = self
            .interfaces
            .get(interface)
            .ok_or_else(|| BusError::unknown_interface(interface))?;
        members
            .iter()
            .find_map(|m| match m {
                Member::Method { info, handler } if info.name == name => Some((info, handler)),
                _ => None,
            })
            .ok_or_else(|| BusError::unknown_method(interface, name))
    }

    /// Whether a signal with this name is registered on the interface.
    #[must_use]
    pub fn has_signal(&self, interface: &str, name: &str) -> bool {
        self.interfaces
            .get(interface)
            .is_some_and(|members| {
                members
                    .iter()
                    .any(|m| matches!(m, Member::Signal(info) if info.name == name))
            })
    }

    /// Interface names with at least one member.
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    /// Members of one interface in registration order.
    #[must_use]
    pub fn members(&self, interface: &str) -> &[Member] {
        self.interfaces
            .get(interface)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All members grouped by interface.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Member])> {
        self.interfaces
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
