use crate::scale::DEFAULT_HELPER_IMPORT;
use crate::select::FileFilter;
use serde::Deserialize;
use std::fmt;

/// Optional settings read from `scalify.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Source file extension picked up in directory mode, without the dot
    pub extension: String,
    /// Import URI inserted when a file gains scaled units
    pub helper_import: String,
    /// Directory names skipped while walking
    pub exclude_dirs: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            extension: "dart".to_string(),
            helper_import: DEFAULT_HELPER_IMPORT.to_string(),
            exclude_dirs: Vec::new(),
        }
    }
}

impl RewriteConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.extension.trim().is_empty() {
            issues.push(ValidationIssue::MissingField { field: "extension" });
        } else if self.extension.starts_with('.') {
            issues.push(ValidationIssue::InvalidValue {
                field: "extension",
                message: format!("'{}' must not start with a dot", self.extension),
            });
        }

        if self.helper_import.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "helper_import",
            });
        } else if self.helper_import.contains(['\'', '"', '\n']) {
            issues.push(ValidationIssue::InvalidValue {
                field: "helper_import",
                message: "must be a bare URI without quotes or line breaks".to_string(),
            });
        }

        for dir in &self.exclude_dirs {
            if dir.trim().is_empty() || dir.contains(['/', '\\']) {
                issues.push(ValidationIssue::InvalidValue {
                    field: "exclude_dirs",
                    message: format!("'{dir}' must be a single directory name"),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// File filter for directory walks.
    pub fn file_filter(&self) -> FileFilter {
        FileFilter {
            extension: self.extension.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
        }
    }
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

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    MissingField {
        field: &'static str,
    },
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "config field '{field}' must not be empty")
            }
            ValidationIssue::InvalidValue { field, message } => {
                write!(f, "config field '{field}' is invalid: {message}")
            }
        }
    }
}
