use std::collections::HashMap;

use super::context::{normalize, Context};
use crate::error::InvalidContextError;

pub type Tags = HashMap<String, String>;

pub const PROGRAM_TAG: &str = "program";
pub const FUNCTION_TAG: &str = "function";

/// Returns a copy of `base` with the normalized `context` laid over it.
///
/// Context entries win on key collision. `base` is left untouched.
pub fn merge(base: &Tags, context: &Context) -> Result<Tags, InvalidContextError> {
    let overlay = normalize(context)?;

    let mut merged = base.clone();
    merged.extend(overlay);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Tags {
        Tags::from([
            ("program".to_string(), "merge_test".to_string()),
            ("function".to_string(), "main".to_string()),
        ])
    }

    #[test]
    fn test_context_overrides_base() {
        let merged = merge(&base(), &Context::from([("function", "worker"), ("job", "7")])).unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["function"], "worker");
        assert_eq!(merged["program"], "merge_test");
        assert_eq!(merged["job"], "7");
    }

    #[test]
    fn test_base_is_not_mutated() {
        let base = base();
        let before = base.clone();

        let _ = merge(&base, &Context::from([("extra", "1")])).unwrap();
        let _ = merge(&base, &Context::Error("boom".into())).unwrap();

        assert_eq!(base, before);
    }

    #[test]
    fn test_invalid_context_propagates() {
        let err = merge(&base(), &Context::from(String::new())).unwrap_err();
        assert!(err.type_name().ends_with("String"));
    }
}
