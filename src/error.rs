use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    /// Request could not be sent or its body could not be read
    #[error("Transport failure ({url}): {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered a fetch with a non-success status
    #[error("{url} answered with status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    /// JSON parsing failed (schema, process list, attachment list)
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error ({context}): {source}")]
    Config {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Form has no screen")]
    MissingScreen,

    #[error("Form has no action")]
    MissingAction,

    #[error("Form has no attachment endpoint")]
    MissingAttachmentUrl,

    #[error("Screen has no grouping at index {0}")]
    NoGrouping(usize),

    /// Breadcrumb navigation to a step that was never reached
    #[error("Step {ordinal} has not been reached yet")]
    StepNotReached { ordinal: usize },

    #[error("Button '{0}' is not on the current step")]
    UnknownButton(String),

    #[error("Task is suspended; no actions can be taken until it is reactivated")]
    TaskSuspended,

    /// A control could not take the requested value
    #[error("Cannot assign '{name}': {reason}")]
    InvalidAssignment { name: String, reason: String },
}
