//! Shape of the Sunlight lookup responses.
//!
//! Congress wraps its records as `{"results": [...], "count": n}` while Open
//! States returns a bare array. Records themselves stay opaque JSON and are
//! mapped by `fyr_core::normalize`.

use serde_json::Value;

/// Records extracted from a provider payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    Records(Vec<Value>),
    /// Nothing to show: an empty list, an error-status envelope, or a payload
    /// with no record list at all.
    Empty,
}

/// Pull the record list out of a provider payload.
///
/// The list lives either at the root or under `results`. A root object whose
/// `status` is `"500"` (string or number) is treated as an empty result.
#[must_use]
pub fn extract_results(payload: Value) -> ResultSet {
    let records = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                if is_error_status(map.get("status")) {
                    tracing::debug!("provider payload carries error status 500");
                }
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    if records.is_empty() {
        ResultSet::Empty
    } else {
        ResultSet::Records(records)
    }
}

fn is_error_status(status: Option<&Value>) -> bool {
    match status {
        Some(Value::String(s)) => s == "500",
        Some(Value::Number(n)) => n.as_u64() == Some(500),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_array_is_used_directly() {
        let set = extract_results(json!([{ "full_name": "A" }, { "full_name": "B" }]));
        assert!(matches!(set, ResultSet::Records(ref r) if r.len() == 2));
    }

    #[test]
    fn results_key_is_preferred() {
        let set = extract_results(json!({ "results": [{ "last_name": "Doe" }], "count": 1 }));
        assert_eq!(
            set,
            ResultSet::Records(vec![json!({ "last_name": "Doe" })])
        );
    }

    #[test]
    fn empty_lists_are_empty() {
        assert_eq!(extract_results(json!([])), ResultSet::Empty);
        assert_eq!(
            extract_results(json!({ "results": [], "count": 0 })),
            ResultSet::Empty
        );
    }

    #[test]
    fn error_status_is_empty() {
        assert_eq!(extract_results(json!({ "status": "500" })), ResultSet::Empty);
        assert_eq!(extract_results(json!({ "status": 500 })), ResultSet::Empty);
    }

    #[test]
    fn unexpected_shapes_are_empty() {
        assert_eq!(extract_results(json!({ "message": "hi" })), ResultSet::Empty);
        assert_eq!(extract_results(json!(null)), ResultSet::Empty);
    }
}
