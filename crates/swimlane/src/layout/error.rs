//! Layout failures.

use std::fmt;

use thiserror::Error;

use swimlane_core::{identifier::Id, process::NodeKind};

/// Broad classes of layout failure.
///
/// Every class is fatal for the diagram being laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input lacks something the layout needs (shapes, tasks).
    Precondition,
    /// A referenced node, shape or connector does not exist.
    Integrity,
    /// A task has no role to place it by.
    Assignment,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Precondition => "precondition",
            ErrorCategory::Integrity => "integrity",
            ErrorCategory::Assignment => "assignment",
        };
        f.write_str(name)
    }
}

/// An error that aborts a layout pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("cannot compute the diagram extent: the diagram has no shapes")]
    EmptyDiagram,

    #[error("cannot place {kind}: the diagram has no task to align it with")]
    NoReferenceTask { kind: NodeKind },

    #[error("node `{0}` has no shape")]
    MissingShape(Id),

    #[error("sequence flow `{0}` has no connector")]
    MissingConnector(Id),

    #[error("no lane was built for role `{0}`")]
    MissingLane(String),

    #[error("task `{task}` has no role assignment")]
    UnassignedTask { task: String },

    #[error("task `{0}` has no name to look its role up by")]
    UnnamedTask(Id),

    #[error("task `{task}` is assigned an empty role name")]
    EmptyRole { task: String },
}

impl LayoutError {
    /// Returns the class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayoutError::EmptyDiagram | LayoutError::NoReferenceTask { .. } => {
                ErrorCategory::Precondition
            }
            LayoutError::MissingShape(_)
            | LayoutError::MissingConnector(_)
            | LayoutError::MissingLane(_) => ErrorCategory::Integrity,
            LayoutError::UnassignedTask { .. }
            | LayoutError::UnnamedTask(_)
            | LayoutError::EmptyRole { .. } => ErrorCategory::Assignment,
        }
    }
}
