//! Error types for the widget.
//!
//! Everything here is a precondition violation detected while the page
//! starts up (or a programming error afterwards). Storage problems are not
//! errors at this level: they are logged and the widget keeps working.

use ratatoskr_model::ModelError;
use thiserror::Error;

/// Fatal widget error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WidgetError {
    // =========================================================================
    // PAGE ERRORS
    // =========================================================================
    /// A required query string parameter is absent or empty.
    #[error("Required query parameter '{name}' is missing")]
    MissingQueryParam {
        /// The parameter name.
        name: String,
    },

    /// A required element is not in the document.
    #[error("Required element {what} is missing")]
    MissingElement {
        /// Description of the element.
        what: String,
    },

    /// An element exists but is not the expected kind of control.
    #[error("{what} must be {expected}, found {found}")]
    WrongElementKind {
        /// Description of the element.
        what: String,
        /// The accepted kind(s).
        expected: &'static str,
        /// The kind actually found.
        found: String,
    },

    /// A selection control has no name to identify it by.
    #[error("{what} has no name")]
    UnnamedControl {
        /// Description of the control.
        what: String,
    },

    /// A group container has no id to scope its tags by.
    #[error("Group container of {control} has no id")]
    UnnamedGroup {
        /// Description of the control inside the container.
        control: String,
    },

    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// Configuration JSON could not be parsed.
    #[error("Failed to parse widget configuration")]
    ConfigParse {
        #[source]
        source: serde_json::Error,
    },

    /// Configuration values are inconsistent.
    #[error("Invalid widget configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    // =========================================================================
    // RUNTIME ERRORS
    // =========================================================================
    /// An event referred to a binding the controller never handed out.
    #[error("No control is bound under id {0}")]
    UnknownBinding(usize),

    /// The submission payload could not be serialized.
    #[error("Failed to serialize submission")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;
