//! Wire handler for the standard interfaces
//!
//! Decodes method-call arguments into typed calls on an exported object and
//! encodes the result (or the error reply) back into wire values.
//!
//! Argument rules:
//! - `Get(s interface_name, s property_name) -> v`
//! - `Set(s interface_name, s property_name, v value)`
//! - `GetAll(s interface_name) -> a{sv}`
//! - `Introspect() -> s`
//! - `GetManagedObjects() -> a{oa{sa{sv}}}`

use std::collections::BTreeMap;
use std::sync::Arc;

use bus_types::{BusError, Value};
use tracing::debug;

use crate::domain::PropertiesConfig;
use crate::error::PropertyError;
use crate::ports::ExportedApi;
use crate::service::ObjectManager;

/// Handler for `org.freedesktop.DBus.Properties` and
/// `org.freedesktop.DBus.Introspectable` calls on one object.
pub struct PropertiesHandler {
    object: Arc<dyn ExportedApi>,
    sanitize: bool,
}

impl PropertiesHandler {
    pub fn new(object: Arc<dyn ExportedApi>, config: &PropertiesConfig) -> Self {
        Self {
            object,
            sanitize: config.sanitize_accessor_errors,
        }
    }

    pub fn handle_get(&self, args: &[Value]) -> Result<Vec<Value>, BusError> {
        expect_args("Get", args, 2)?;
        let interface = str_arg(args, 0, "interface_name")?;
        let property = str_arg(args, 1, "property_name")?;

        let value = self
            .object
            .get(interface, property)
            .map_err(|e| self.reply_error(e))?;
        Ok(vec![value.into_variant()])
    }

    pub fn handle_set(&self, args: &[Value]) -> Result<Vec<Value>, BusError> {
        expect_args("Set", args, 3)?;
        let interface = str_arg(args, 0, "interface_name")?;
        let property = str_arg(args, 1, "property_name")?;
        let value = args[2].clone().into_inner();

        self.object
            .set(interface, property, value)
            .map_err(|e| self.reply_error(e))?;
        Ok(Vec::new())
    }

    pub fn handle_get_all(&self, args: &[Value]) -> Result<Vec<Value>, BusError> {
        expect_args("GetAll", args, 1)?;
        let interface = str_arg(args, 0, "interface_name")?;

        let values = self
            .object
            .get_all(interface)
            .map_err(|e| self.reply_error(e))?;
        Ok(vec![Value::Dict(wrap_values(values))])
    }

    pub fn handle_introspect(&self, args: &[Value]) -> Result<Vec<Value>, BusError> {
        expect_args("Introspect", args, 0)?;
        let xml = self
            .object
            .introspect(self.object.object_path())
            .map_err(|e| self.reply_error(e))?;
        Ok(vec![Value::Str(xml)])
    }

    fn reply_error(&self, err: PropertyError) -> BusError {
        let reply = err.to_bus_error(self.sanitize);
        debug!(error_name = %reply.name, "Replying with error");
        reply
    }
}

/// Handler for `org.freedesktop.DBus.ObjectManager` calls.
pub struct ObjectManagerHandler {
    manager: Arc<ObjectManager>,
    sanitize: bool,
}

impl ObjectManagerHandler {
    pub fn new(manager: Arc<ObjectManager>, config: &PropertiesConfig) -> Self {
        Self {
            manager,
            sanitize: config.sanitize_accessor_errors,
        }
    }

    pub fn handle_get_managed_objects(&self, args: &[Value]) -> Result<Vec<Value>, BusError> {
        expect_args("GetManagedObjects", args, 0)?;
        let objects = self
            .manager
            .get_managed_objects()
            .map_err(|e| e.to_bus_error(self.sanitize))?;

        let encoded = objects
            .into_iter()
            .map(|(path, interfaces)| {
                let interfaces = interfaces
                    .into_iter()
                    .map(|(name, props)| (name, Value::Dict(wrap_values(props))))
                    .collect();
                (path.as_str().to_string(), Value::Dict(interfaces))
            })
            .collect();
        Ok(vec![Value::Dict(encoded)])
    }
}

fn expect_args(method: &str, args: &[Value], count: usize) -> Result<(), BusError> {
    if args.len() != count {
        return Err(BusError::invalid_args(format!(
            "{} expects {} arguments, got {}",
            method,
            count,
            args.len()
        )));
    }
    Ok(())
}

fn str_arg<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a str, BusError> {
    args[index]
        .as_str()
        .ok_or_else(|| BusError::invalid_args(format!("{} must be a string", name)))
}

/// `a{sv}` values are variants on the wire.
fn wrap_values(values: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    values
        .into_iter()
        .map(|(name, value)| (name, value.into_variant()))
        .collect()
}
