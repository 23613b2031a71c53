use crate::ts::NodeKinds;
use serde::Deserialize;
use std::fmt;

/// Finder configuration.
///
/// ```toml
/// extra_kinds = ["match_statement"]
/// exclude_kinds = ["if_statement"]
/// ```
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FinderConfig {
    /// Node kinds added to the default Python allow-list.
    #[serde(default)]
    pub extra_kinds: Vec<String>,
    /// Default node kinds removed from the allow-list.
    #[serde(default)]
    pub exclude_kinds: Vec<String>,
}

impl FinderConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (field, kinds) in [
            ("extra_kinds", &self.extra_kinds),
            ("exclude_kinds", &self.exclude_kinds),
        ] {
            for kind in kinds {
                if !is_kind_name(kind) {
                    issues.push(ValidationIssue::InvalidKind {
                        field,
                        kind: kind.clone(),
                    });
                }
            }
        }

        if issues.is_empty() && self.node_kinds().is_empty() {
            issues.push(ValidationIssue::EmptyAllowList);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// The allow-list after applying `extra_kinds` then `exclude_kinds`.
    pub fn node_kinds(&self) -> NodeKinds {
        let mut kinds = NodeKinds::python();
        for kind in &self.extra_kinds {
            kinds.insert(kind.as_str());
        }
        for kind in &self.exclude_kinds {
            kinds.remove(kind);
        }
        kinds
    }
}

fn is_kind_name(kind: &str) -> bool {
    !kind.is_empty() && kind.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyAllowList,
    InvalidKind { field: &'static str, kind: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyAllowList => {
                write!(f, "configuration leaves no node kinds to search for")
            }
            ValidationIssue::InvalidKind { field, kind } => {
                write!(f, "'{kind}' in {field} is not a valid node kind name")
            }
        }
    }
}
