use thiserror::Error;

/// Returned when a context value can't be folded into tags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid type for context. Must be map, struct, ptr(map) or ptr(struct)")]
pub struct InvalidContextError {
    type_name: String,
}

impl InvalidContextError {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    /// Name of the type that was rejected.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level `{0}`, expected DEBUG or INFO")]
pub struct ParseLevelError(pub String);
