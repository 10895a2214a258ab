//! The uniform result envelope every adapter returns.

use serde_json::{json, Value};

/// Outcome of a tool execution.
///
/// Serializes to exactly one of two shapes, with the payload field named
/// per adapter (`flights`, `hotels`, `forecast`, `cars`, `results`):
///
/// ```json
/// {"status": "success", "flights": [...]}
/// {"status": "error", "error": "No flights found"}
/// ```
///
/// # Example
///
/// ```
/// use travelkit::tools::ToolOutcome;
/// use serde_json::json;
///
/// let ok = ToolOutcome::success("flights", json!([]));
/// assert_eq!(ok.to_value()["status"], "success");
///
/// let err = ToolOutcome::error("No flights found");
/// assert_eq!(err.to_value()["error"], "No flights found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The adapter produced a payload.
    Success {
        /// Name of the payload field in the serialized envelope.
        field: &'static str,
        /// The normalized payload.
        payload: Value,
    },
    /// The adapter failed; the message is meant for the LLM to relay.
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ToolOutcome {
    /// Create a success outcome with the given payload field name.
    pub fn success(field: &'static str, payload: Value) -> Self {
        Self::Success { field, payload }
    }

    /// Create an error outcome.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Serialize to the wire envelope.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success { field, payload } => {
                let mut map = serde_json::Map::new();
                map.insert("status".to_string(), Value::String("success".to_string()));
                map.insert((*field).to_string(), payload.clone());
                Value::Object(map)
            }
            Self::Error { message } => json!({
                "status": "error",
                "error": message,
            }),
        }
    }

    /// Serialize to a JSON string for handing back to the agent runtime.
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}
