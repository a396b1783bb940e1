//! Per-call argument extraction. Required strings are checked against the
//! catalogue before any adapter call; everything else is lenient.

use serde_json::{Map, Value as JsonValue};

use crate::core::error::GatewayError;
use crate::core::tool::{FieldKind, ToolDescriptor};
use crate::domain::Visibility;

pub type Args = Map<String, JsonValue>;

/// Reject calls whose required string fields are absent or not strings.
pub fn check_required(descriptor: &ToolDescriptor, args: &Args) -> Result<(), GatewayError> {
    let missing: Vec<&str> = descriptor
        .fields
        .iter()
        .filter(|f| f.required && f.kind == FieldKind::String)
        .filter(|f| !args.get(f.name).is_some_and(JsonValue::is_string))
        .map(|f| f.name)
        .collect();
    match missing.as_slice() {
        [] => Ok(()),
        [one] => Err(GatewayError::InvalidArgument(format!("{one} must be a string"))),
        many => Err(GatewayError::InvalidArgument(format!(
            "{} must be strings",
            many.join(" and ")
        ))),
    }
}

pub fn str_arg<'a>(args: &'a Args, name: &str) -> Option<&'a str> {
    args.get(name).and_then(JsonValue::as_str)
}

/// Optional string; values of any other type are ignored.
pub fn opt_string(args: &Args, name: &str) -> Option<String> {
    str_arg(args, name).map(str::to_owned)
}

/// Numeric pagination argument; non-numbers fall back to the default.
pub fn number_or(args: &Args, name: &str, default: u32) -> u32 {
    args.get(name)
        .and_then(JsonValue::as_f64)
        .filter(|n| n.is_finite())
        .map(|n| n.clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(default)
}

/// `visibility` defaults to PUBLIC when absent or null; any other non-enum value is rejected.
pub fn visibility(args: &Args) -> Result<Visibility, GatewayError> {
    match args.get("visibility") {
        None | Some(JsonValue::Null) => Ok(Visibility::Public),
        Some(JsonValue::String(s)) if s.is_empty() => Ok(Visibility::Public),
        Some(JsonValue::String(s)) => Visibility::parse(s).ok_or_else(|| {
            GatewayError::InvalidArgument(format!(
                "visibility must be PUBLIC or CONNECTIONS, got {s}"
            ))
        }),
        Some(other) => Err(GatewayError::InvalidArgument(format!(
            "visibility must be a string, got {other}"
        ))),
    }
}
