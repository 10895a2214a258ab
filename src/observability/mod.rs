//! Observability utilities for the tool layer.
//!
//! Provides a markdown-formatted execution log so every tool call an
//! agent makes - arguments, outcome, success flag - can be reviewed after
//! the conversation.
//!
//! # Example
//!
//! ```no_run
//! use travelkit::observability::Logger;
//!
//! let logger = Logger::new(None).unwrap();
//! logger
//!     .log_tool_execution(
//!         "check_flights",
//!         r#"{"origin": "LAX", "destination": "JFK"}"#,
//!         r#"{"status": "success", "flights": []}"#,
//!         true,
//!     )
//!     .unwrap();
//! ```

pub mod logger;

// Re-export main types for convenience
pub use logger::Logger;
