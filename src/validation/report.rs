//! Export report types for structured diagnostics.
//!
//! Everything the export notices but does not abort on ends up here:
//! staff-less elements, pieces flagged by validation, removed duplicates.
//! The same events are also emitted through `tracing`.

use serde::Serialize;
use std::fmt;

/// Diagnostics collected during one export.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues, in the order they were found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Appends all issues of `other`.
    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns the number of issues with the given code.
    pub fn count(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Export passed: no issues found");
        }

        writeln!(
            f,
            "Export completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single diagnostic.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates a new issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Recorded for downstream filtering; the export is still usable.
    Warning,
    /// Internal inconsistency; data was skipped.
    Error,
}

/// A stable code identifying the type of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Collection issues
    /// A visible element has no staff and is not on the staff-less allow-list.
    UnexpectedStafflessElement,
    /// An element resolved to a staff that has no staff lines.
    MissingStaffRecord,

    // Piece issues
    /// A piece has a NaN or infinite coordinate.
    NonFinitePosition,
    /// A piece's step position lies outside the OCR window.
    LineOutOfRange,
    /// A piece's y lies outside the OCR window.
    YOutOfRange,
    /// A piece sits too close to the previous piece of the same category.
    XSpacingTooLow,
    /// A piece was removed as a spurious duplicate.
    DuplicateRemoved,
    /// A piece survived next to a removed duplicate.
    DuplicateNearby,
}

/// Where an issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// Issue with the scene as a whole.
    Scene,
    /// Issue with a scene element.
    Element { id: u64, name: String },
    /// Issue with a piece on a sorted staff.
    Piece { staff: usize, x: f64, tick: i32 },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Scene => write!(f, "scene"),
            IssueContext::Element { id, name } => write!(f, "element {} ({})", id, name),
            IssueContext::Piece { staff, x, tick } => {
                write!(f, "staff {} piece at x={:.2} tick {}", staff, x, tick)
            }
        }
    }
}
