//! Per-document validation outcome.

use std::fmt;

/// One way a resource fails to conform to its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value in the resource.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Classification of a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    /// No resource in the slot.
    Empty,
    /// The resource matched its schema.
    Valid,
    /// The resource violated its schema.
    Invalid,
}

/// Outcome of validating one document.
///
/// `errors` is non-empty only when both `kind` and `api_version` were
/// resolved and the schema ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// File (or stdin label) the document came from.
    pub file_name: String,
    /// Resource kind; empty if the document held no resource.
    pub kind: String,
    /// Resource API version; empty if undetermined.
    pub api_version: String,
    /// Schema violations, in validator order.
    pub errors: Vec<Violation>,
}

impl ValidationResult {
    /// Placeholder for an empty slot.
    pub fn empty(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: String::new(),
            api_version: String::new(),
            errors: Vec::new(),
        }
    }

    /// Result for a resource that was validated.
    pub fn validated(
        file_name: impl Into<String>,
        kind: impl Into<String>,
        api_version: impl Into<String>,
        errors: Vec<Violation>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            kind: kind.into(),
            api_version: api_version.into(),
            errors,
        }
    }

    /// Invalid when violations exist, Empty when no kind was found, else Valid.
    pub fn status(&self) -> ResultStatus {
        if !self.errors.is_empty() {
            ResultStatus::Invalid
        } else if self.kind.is_empty() {
            ResultStatus::Empty
        } else {
            ResultStatus::Valid
        }
    }

    /// True unless the resource violated its schema.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert_eq!(ValidationResult::empty("a.yaml").status(), ResultStatus::Empty);
        assert_eq!(
            ValidationResult::validated("a.yaml", "Service", "v1", Vec::new()).status(),
            ResultStatus::Valid
        );
        let invalid = ValidationResult::validated(
            "a.yaml",
            "Service",
            "v1",
            vec![Violation {
                instance_path: "/spec".to_string(),
                schema_path: "/properties/spec/type".to_string(),
                message: r#""x" is not of type "object""#.to_string(),
            }],
        );
        assert_eq!(invalid.status(), ResultStatus::Invalid);
        assert!(!invalid.is_ok());
    }

    #[test]
    fn test_violation_display() {
        let root = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""metadata" is a required property"#.to_string(),
        };
        assert_eq!(root.to_string(), r#"(root): "metadata" is a required property"#);

        let nested = Violation {
            instance_path: "/spec/replicas".to_string(),
            schema_path: "/properties/spec/properties/replicas/type".to_string(),
            message: r#""three" is not of type "integer""#.to_string(),
        };
        assert!(nested.to_string().starts_with("/spec/replicas: "));
    }
}
