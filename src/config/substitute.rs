//! `${VAR}` / `${VAR:default}` substitution inside override documents.

use super::EnvVars;
use serde_json::Value;
use tracing::warn;

/// Prefix substituted for variables that are unset and have no default.
pub const MISSING_PREFIX: &str = "MISSING_";

/// Substitute environment references in every string of a document, recursively.
pub fn substitute_value(value: &Value, env: &EnvVars) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(s, env)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute_value(v, env)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_value(v, env)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Substitute environment references in a single string.
///
/// An unterminated `${` is copied through untouched.
pub fn substitute_str(input: &str, env: &EnvVars) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let reference = &after[..end];
        out.push_str(&resolve(reference, env));
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn resolve(reference: &str, env: &EnvVars) -> String {
    match reference.split_once(':') {
        Some((name, default)) => env.get(name).unwrap_or_else(|| default.to_string()),
        None => env.get(reference).unwrap_or_else(|| {
            warn!(variable = reference, "Environment variable referenced in config is not set");
            format!("{}{}", MISSING_PREFIX, reference)
        }),
    }
}
