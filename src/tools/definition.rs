//! Tool definition type handed to the orchestrating agent runtime.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A canonical description of one callable tool.
///
/// This is the shape the agent runtime consumes when deciding which tool
/// to call: a unique name, a description written for the LLM, and a JSON
/// Schema of the accepted arguments.
///
/// # Example
///
/// ```
/// use travelkit::tools::ToolDefinition;
/// use serde_json::json;
///
/// let def = ToolDefinition::new(
///     "check_weather",
///     "Get the forecast for a location on a date",
///     json!({
///         "type": "object",
///         "properties": {
///             "location": { "type": "string", "description": "City or place name" }
///         },
///         "required": ["location"]
///     }),
/// );
///
/// let schema = def.to_openai_function();
/// assert_eq!(schema["function"]["name"], "check_weather");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique identifier used for registry lookup and function calls.
    pub name: String,

    /// Human-readable description for LLM consumption.
    pub description: String,

    /// JSON Schema describing the accepted arguments, compatible with
    /// OpenAI's function calling format.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Generate an OpenAI-compatible function calling schema.
    pub fn to_openai_function(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }

    /// Check if this tool declares any parameters.
    pub fn has_parameters(&self) -> bool {
        self.parameters
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|obj| !obj.is_empty())
            .unwrap_or(false)
    }
}
