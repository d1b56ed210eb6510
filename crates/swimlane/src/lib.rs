//! Swimlane - Lane layout for discovered business process models
//!
//! This library takes a process model produced by a discovery service
//! (tasks, gateways, start and end events joined by sequence flows, each with
//! an initial unstyled geometry) and lays it out as a swimlane diagram: one
//! horizontal lane per organizational role, every task moved into its role's
//! lane, and every connector redrawn to match.

pub mod config;
pub mod document;
pub mod layout;

mod error;
mod roles;

pub use swimlane_core::{geometry, identifier, process};

pub use error::SwimlaneError;
pub use layout::{LayoutEngine, LayoutOutcome};
pub use roles::{RoleAssignment, normalize_role};

use log::{debug, info, trace};

use config::AppConfig;
use document::{DiagramDocument, RoleDocument};
use process::ProcessDiagram;

/// Builder for reading, laying out and writing swimlane diagrams.
///
/// This provides an API for processing diagrams in their JSON interchange
/// form through the layout pipeline.
///
/// # Examples
///
/// ```
/// use swimlane::{DiagramBuilder, config::AppConfig};
///
/// let diagram_json = r#"{
///     "nodes": [
///         { "id": "t1", "kind": "task", "name": "Register",
///           "bounds": { "x": 100, "y": 40, "width": 100, "height": 36 } }
///     ]
/// }"#;
/// let roles_json = r#"{ "Register": "Front Office" }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let mut diagram = builder.parse(diagram_json).unwrap();
/// let roles = builder.parse_roles(roles_json).unwrap();
///
/// builder.layout(&mut diagram, &roles).unwrap();
/// let json = builder.render_json(&diagram).unwrap();
/// assert!(json.contains("Lane_Front_Office"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a JSON diagram document into a process diagram.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError` for malformed JSON or for a document whose
    /// elements do not form a valid process graph.
    pub fn parse(&self, source: &str) -> Result<ProcessDiagram, SwimlaneError> {
        info!("Reading diagram document");
        let document = DiagramDocument::from_json(source)?;
        let diagram = document.to_diagram()?;
        debug!(
            nodes_count = diagram.nodes_count(),
            flows_count = diagram.flows().count();
            "Diagram built"
        );
        Ok(diagram)
    }

    /// Parse a JSON role document into a role assignment.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError` for malformed JSON.
    pub fn parse_roles(&self, source: &str) -> Result<RoleAssignment, SwimlaneError> {
        let roles: RoleAssignment = RoleDocument::from_json(source)?.into();
        debug!(tasks_count = roles.len(); "Role assignment read");
        trace!(roles:?; "Role assignment");
        Ok(roles)
    }

    /// Lay out `diagram` in place.
    ///
    /// The routing jitter is seeded from the configuration when a seed is
    /// set, and from OS entropy otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError::Layout` when the pipeline aborts. The diagram
    /// is left untouched in that case.
    pub fn layout(
        &self,
        diagram: &mut ProcessDiagram,
        roles: &RoleAssignment,
    ) -> Result<LayoutOutcome, SwimlaneError> {
        let engine = LayoutEngine::new(self.config.clone());
        let outcome = engine.layout_seeded(diagram, roles)?;
        info!(
            lanes_count = outcome.lanes().len(),
            unresolved_overlaps = outcome.overlaps().unresolved().len();
            "Diagram laid out"
        );
        Ok(outcome)
    }

    /// Render a diagram, including its lanes, as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError::Document` if serialization fails.
    pub fn render_json(&self, diagram: &ProcessDiagram) -> Result<String, SwimlaneError> {
        let json = DiagramDocument::from_diagram(diagram).to_json_pretty()?;
        Ok(json)
    }
}
