//! Registry and dispatch for tool adapters.

use crate::observability::Logger;
use crate::tools::{ToolAdapter, ToolDefinition, ToolError, ToolOutcome};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A tool invocation as emitted by the agent runtime.
///
/// Some LLM providers send `arguments` as a JSON object, others as a
/// JSON-encoded string; [`ToolRegistry::dispatch`] accepts both.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back with the result.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Arguments, as object or JSON-encoded string.
    pub arguments: Value,
}

impl ToolCall {
    /// Create a tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Registry of tool adapters, the seam between this crate and the
/// orchestrating agent runtime.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use travelkit::client::OpenMeteoClient;
/// use travelkit::tools::{ToolRegistry, WeatherTool};
///
/// let mut registry = ToolRegistry::new();
/// registry
///     .register(WeatherTool::new(Arc::new(OpenMeteoClient::new())))
///     .unwrap();
///
/// assert!(registry.contains("check_weather"));
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn ToolAdapter>>,
    logger: Option<Arc<Logger>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a logger; every dispatched execution is recorded through it.
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Register a tool adapter.
    ///
    /// Returns an error if a tool with the same name already exists.
    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: ToolAdapter + 'static,
    {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::duplicate_name(name));
        }
        self.tools.insert(name, Box::new(tool));
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn ToolAdapter> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Canonical definitions of all registered tools.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// OpenAI-compatible function schemas for all registered tools.
    pub fn openai_functions(&self) -> Vec<Value> {
        self.tools
            .values()
            .map(|t| t.definition().to_openai_function())
            .collect()
    }

    /// Execute a tool call and return the envelope.
    ///
    /// Unknown tools and malformed argument strings become error
    /// envelopes - dispatch upholds the same never-raise contract as the
    /// adapters themselves.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolOutcome {
        let Some(tool) = self.get(&call.name) else {
            return ToolOutcome::error(format!("Unknown tool: {}", call.name));
        };

        // Re-parse arguments sent as a JSON-encoded string
        let arguments = match &call.arguments {
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    return ToolOutcome::error(format!(
                        "Could not parse arguments for {}: {}",
                        call.name, e
                    ));
                }
            },
            other => other.clone(),
        };

        let outcome = tool.execute(arguments.clone()).await;

        if let Some(logger) = &self.logger {
            let _ = logger.log_tool_execution(
                &call.name,
                &arguments.to_string(),
                &outcome.to_json_string(),
                outcome.is_success(),
            );
        }

        outcome
    }
}
