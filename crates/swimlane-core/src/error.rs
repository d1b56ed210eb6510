//! Errors raised while assembling a process diagram.

use thiserror::Error;

use crate::identifier::Id;

/// Integrity violations detected while building a
/// [`ProcessDiagram`](crate::process::ProcessDiagram).
///
/// These correspond to malformed input from the discovery boundary: every
/// element must be unique and every reference must resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("duplicate element id `{0}`")]
    DuplicateId(Id),

    #[error("sequence flow `{flow}` references unknown node `{node}`")]
    DanglingFlow { flow: Id, node: Id },
}
