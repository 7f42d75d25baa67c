use serde::{Deserialize, Serialize};

/// Severity of the issue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

/// Machine-readable issue code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    Invalid,
    NotFound,
    Conflict,
    Exception,
    Throttled,
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub diagnostics: String,
}

impl Outcome {
    pub fn error(code: IssueCode, diagnostics: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code,
            diagnostics: diagnostics.into(),
        }
    }

    pub fn not_found(diagnostics: impl Into<String>) -> Self {
        Self::error(IssueCode::NotFound, diagnostics)
    }

    pub fn invalid(diagnostics: impl Into<String>) -> Self {
        Self::error(IssueCode::Invalid, diagnostics)
    }

    pub fn conflict(diagnostics: impl Into<String>) -> Self {
        Self::error(IssueCode::Conflict, diagnostics)
    }
}
