//! Submission validation for the pack/expression form.
//!
//! Validation never rejects input outright: it always returns the (possibly
//! normalized) payload together with per-field flags, and the caller decides
//! whether to abort.  Both fields are checked independently so the UI can
//! flag both at once.

/// A validated submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Selected pack id, empty when nothing is selected.
    pub pack: String,
    /// Normalized expression, braces included.
    pub expression: String,
    pub pack_missing: bool,
    pub expression_missing: bool,
}

impl Submission {
    /// True when the submission must not be sent.
    pub fn err(&self) -> bool {
        self.pack_missing || self.expression_missing
    }
}

/// Check a pack selection and a raw expression.
///
/// The expression is normalized on every call, error or not; it is only
/// consumed downstream when [`Submission::err`] is false.
pub fn validate(pack: &str, raw_expression: &str) -> Submission {
    Submission {
        pack: pack.to_string(),
        expression: normalize_expression(raw_expression),
        pack_missing: pack.is_empty(),
        expression_missing: raw_expression.is_empty(),
    }
}

/// Wrap an expression in braces unless its first character already is one.
pub fn normalize_expression(raw: &str) -> String {
    if raw.starts_with('{') {
        raw.to_string()
    } else {
        format!("{{{raw}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_submission() {
        let sub = validate("core", "1d6");
        assert!(!sub.err());
        assert_eq!(sub.pack, "core");
        assert_eq!(sub.expression, "{1d6}");
    }

    #[test]
    fn flags_missing_pack() {
        let sub = validate("", "1d6");
        assert!(sub.err());
        assert!(sub.pack_missing);
        assert!(!sub.expression_missing);
    }

    #[test]
    fn flags_missing_expression() {
        let sub = validate("core", "");
        assert!(sub.err());
        assert!(!sub.pack_missing);
        assert!(sub.expression_missing);
    }

    #[test]
    fn flags_both_fields_independently() {
        let sub = validate("", "");
        assert!(sub.pack_missing && sub.expression_missing);
    }

    #[test]
    fn wraps_undelimited_expressions() {
        assert_eq!(normalize_expression("3d6 + 2"), "{3d6 + 2}");
    }

    #[test]
    fn wrap_is_idempotent() {
        let once = normalize_expression("roll()");
        assert_eq!(normalize_expression(&once), once);
    }

    #[test]
    fn leading_brace_passes_through() {
        assert_eq!(normalize_expression("{1d20} extra"), "{1d20} extra");
    }
}
