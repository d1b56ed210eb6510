//! Swimlane layout engine.
//!
//! This module turns a discovered process diagram into a swimlane diagram.
//! Every stage mutates the diagram's geometry in place and runs to
//! completion before the next one starts.
//!
//! # Pipeline
//!
//! ```text
//! ProcessDiagram + RoleAssignment
//!     ↓ lanes     one lane per role, stacked top to bottom
//!     ↓ nodes     tasks into their lane, events and gateways after them
//!     ↓ overlap   spread apart shapes that ended up on top of each other
//!     ↓ routing   redraw every connector from the final shape positions
//! ProcessDiagram + LaneSet
//! ```
//!
//! # Submodules
//!
//! - [`error`] - [`LayoutError`] and its [`ErrorCategory`]
//! - `lanes` - Lane construction
//! - `nodes` - Task, event and gateway placement
//! - `overlap` - Conflict detection and resolution, [`OverlapReport`]
//! - `routing` - Connector routing, [`route`]

pub mod error;

mod lanes;
mod nodes;
mod overlap;
mod routing;

pub use error::{ErrorCategory, LayoutError};
pub use nodes::TaskCenters;
pub use overlap::OverlapReport;
pub use routing::route;

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use swimlane_core::{
    identifier::Id,
    process::{LaneSet, ProcessDiagram},
};

use crate::{config::AppConfig, roles::RoleAssignment};

/// What a successful layout pass produced besides the mutated diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    lanes: LaneSet,
    task_centers: TaskCenters,
    overlaps: OverlapReport,
}

impl LayoutOutcome {
    /// The lanes that were built, in stacking order.
    pub fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    /// The vertical center each task was given when it was moved into its
    /// lane, before overlap resolution.
    pub fn task_centers(&self) -> &TaskCenters {
        &self.task_centers
    }

    pub fn task_center(&self, task: Id) -> Option<f32> {
        self.task_centers.get(&task).copied()
    }

    pub fn overlaps(&self) -> &OverlapReport {
        &self.overlaps
    }
}

/// Runs the layout pipeline over process diagrams.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use swimlane::{
///     LayoutEngine, RoleAssignment,
///     config::AppConfig,
///     geometry::{Bounds, Point, Size},
///     identifier::Id,
///     process::{Node, NodeKind, ProcessDiagram},
/// };
///
/// let mut diagram = ProcessDiagram::new();
/// diagram
///     .add_node(
///         Node::new(Id::new("t1"), NodeKind::Task).with_name("Register"),
///         Bounds::new_from_top_left(Point::new(100.0, 40.0), Size::new(100.0, 36.0)),
///     )
///     .unwrap();
/// let roles = RoleAssignment::from_records([("Register", "Front Office")]);
///
/// let engine = LayoutEngine::new(AppConfig::default());
/// let outcome = engine
///     .layout(&mut diagram, &roles, &mut StdRng::seed_from_u64(7))
///     .unwrap();
///
/// assert_eq!(outcome.lanes().lanes()[0].name(), "Front_Office");
/// assert_eq!(outcome.task_center(Id::new("t1")), Some(120.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: AppConfig,
}

impl LayoutEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out `diagram` using `rng` for connector jitter.
    ///
    /// The pipeline runs on a working copy. `diagram` is only replaced once
    /// every stage has succeeded, so on error it is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the diagram is empty, a task cannot be
    /// assigned to a lane, an event or gateway has nothing to align to, or a
    /// flow references a missing shape or connector.
    pub fn layout<R: Rng + ?Sized>(
        &self,
        diagram: &mut ProcessDiagram,
        roles: &RoleAssignment,
        rng: &mut R,
    ) -> Result<LayoutOutcome, LayoutError> {
        if diagram.extent().is_none() {
            return Err(LayoutError::EmptyDiagram);
        }
        nodes::check_assignment(diagram, roles)?;

        info!(
            nodes_count = diagram.nodes_count(),
            roles_count = roles.roles().count();
            "Laying out diagram"
        );

        let lane_config = self.config.lanes();
        let mut working = diagram.clone();

        lanes::build_lanes(&mut working, roles, lane_config)?;
        let task_centers = nodes::place_tasks(&mut working, roles, lane_config)?;
        nodes::place_events(&mut working, &task_centers)?;
        nodes::place_gateways(&mut working, &task_centers)?;
        debug!("Nodes repositioned");

        let overlaps = overlap::resolve_overlaps(
            &mut working,
            self.config.overlap(),
            lane_config.lane_height(),
        )?;
        routing::route_connectors(
            &mut working,
            self.config.routing(),
            lane_config.lane_height(),
            rng,
        )?;

        let lanes = working
            .lane_set()
            .cloned()
            .unwrap_or_else(|| LaneSet::new(lane_config.lane_set_name()));
        *diagram = working;

        info!("Layout completed");
        Ok(LayoutOutcome {
            lanes,
            task_centers,
            overlaps,
        })
    }

    /// Lays out `diagram` with a fresh generator.
    ///
    /// The generator is seeded from the configured routing seed when there
    /// is one and from OS entropy otherwise. Every call gets its own
    /// generator.
    ///
    /// # Errors
    ///
    /// See [`LayoutEngine::layout`].
    pub fn layout_seeded(
        &self,
        diagram: &mut ProcessDiagram,
        roles: &RoleAssignment,
    ) -> Result<LayoutOutcome, LayoutError> {
        let mut rng = match self.config.routing().seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.layout(diagram, roles, &mut rng)
    }
}
