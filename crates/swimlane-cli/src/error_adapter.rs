//! Error adapter for converting SwimlaneError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};

use swimlane::{SwimlaneError, layout::ErrorCategory};

/// Adapter that renders a [`SwimlaneError`] as a miette diagnostic.
///
/// Layout failures carry a code naming their class (precondition, integrity
/// or assignment) and a hint on how to fix the input.
pub struct ErrorAdapter(pub SwimlaneError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl Diagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match (&self.0, self.0.category()) {
            (_, Some(ErrorCategory::Precondition)) => "swimlane::precondition",
            (_, Some(ErrorCategory::Integrity)) => "swimlane::integrity",
            (_, Some(ErrorCategory::Assignment)) => "swimlane::assignment",
            (SwimlaneError::Io(_), None) => "swimlane::io",
            (SwimlaneError::Document(_), None) => "swimlane::document",
            (SwimlaneError::Config(_), None) => "swimlane::config",
            (SwimlaneError::Model(_) | SwimlaneError::Layout(_), None) => "swimlane::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0.category()? {
            ErrorCategory::Precondition => {
                "the diagram needs at least one shape, \
                 and at least one task when it has events or gateways"
            }
            ErrorCategory::Integrity => {
                "every sequence flow must connect two nodes of the diagram, \
                 and every id must be unique"
            }
            ErrorCategory::Assignment => {
                "every task name must appear in the role file with a non-empty role"
            }
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use swimlane::{identifier::Id, layout::LayoutError, process::NodeKind};

    use super::*;

    fn code(err: SwimlaneError) -> String {
        ErrorAdapter(err).code().map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_layout_codes() {
        assert_eq!(
            code(LayoutError::EmptyDiagram.into()),
            "swimlane::precondition"
        );
        assert_eq!(
            code(
                LayoutError::NoReferenceTask {
                    kind: NodeKind::StartEvent
                }
                .into()
            ),
            "swimlane::precondition"
        );
        assert_eq!(
            code(LayoutError::MissingShape(Id::new("t1")).into()),
            "swimlane::integrity"
        );
        assert_eq!(
            code(
                LayoutError::UnassignedTask {
                    task: "Register".to_string()
                }
                .into()
            ),
            "swimlane::assignment"
        );
    }

    #[test]
    fn test_non_layout_codes() {
        assert_eq!(
            code(SwimlaneError::Config("bad".to_string())),
            "swimlane::config"
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(code(io.into()), "swimlane::io");
    }

    #[test]
    fn test_help_only_for_layout_failures() {
        let adapter = ErrorAdapter(SwimlaneError::Config("bad".to_string()));
        assert!(adapter.help().is_none());

        let adapter = ErrorAdapter(
            LayoutError::UnassignedTask {
                task: "Register".to_string(),
            }
            .into(),
        );
        let help = adapter.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("role file"));
    }

    #[test]
    fn test_report_renders() {
        let adapter = ErrorAdapter(LayoutError::EmptyDiagram.into());
        let mut rendered = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut rendered, &adapter)
            .unwrap();

        assert!(rendered.contains("swimlane::precondition"));
        assert!(rendered.contains("extent"));
    }
}
