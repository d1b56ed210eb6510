//! JSON interchange documents.
//!
//! [`DiagramDocument`] is the serialized form of a [`ProcessDiagram`]: the
//! flow nodes with their shape bounds, the sequence flows with their
//! waypoints and, on output, the lane set. [`RoleDocument`] is the
//! serialized form of a [`RoleAssignment`].
//!
//! # Diagram format
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "start", "kind": "startEvent",
//!       "bounds": { "x": 0, "y": 40, "width": 36, "height": 36 } },
//!     { "id": "t1", "kind": "task", "name": "Register",
//!       "bounds": { "x": 100, "y": 40, "width": 100, "height": 80 } }
//!   ],
//!   "flows": [
//!     { "id": "f1", "source": "start", "target": "t1", "waypoints": [] }
//!   ]
//! }
//! ```
//!
//! A lane set present on input is ignored; lanes are always rebuilt by the
//! layout engine.
//!
//! # Role formats
//!
//! Either an object mapping activity names to roles, or the rows of an
//! event log:
//!
//! ```json
//! { "Register": "Front Office", "Analyze Defect": "Tester 3" }
//! ```
//!
//! ```json
//! [ { "activity": "Register", "role": "Front Office" } ]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use swimlane_core::{
    ModelError,
    geometry::{Bounds, Point, Size},
    identifier::Id,
    process::{Lane, LaneSet, Node, NodeKind, ProcessDiagram, SequenceFlow},
};

use crate::roles::RoleAssignment;

/// A process diagram as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub flows: Vec<FlowRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_set: Option<LaneSetRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub bounds: BoundsRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub waypoints: Vec<PointRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSetRecord {
    pub id: String,
    pub name: String,
    pub lanes: Vec<LaneRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneRecord {
    pub id: String,
    pub name: String,
    pub index: usize,
    pub bounds: BoundsRecord,
    pub flow_node_refs: Vec<String>,
}

impl From<Bounds> for BoundsRecord {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: bounds.min_x(),
            y: bounds.min_y(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

impl From<BoundsRecord> for Bounds {
    fn from(record: BoundsRecord) -> Self {
        Bounds::new_from_top_left(
            Point::new(record.x, record.y),
            Size::new(record.width, record.height),
        )
    }
}

impl From<Point> for PointRecord {
    fn from(point: Point) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
        }
    }
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Point::new(record.x, record.y)
    }
}

impl From<&Lane> for LaneRecord {
    fn from(lane: &Lane) -> Self {
        Self {
            id: lane.id().to_string(),
            name: lane.name().to_string(),
            index: lane.index(),
            bounds: lane.bounds().into(),
            flow_node_refs: lane.flow_node_refs().iter().map(Id::to_string).collect(),
        }
    }
}

impl From<&LaneSet> for LaneSetRecord {
    fn from(lane_set: &LaneSet) -> Self {
        Self {
            id: lane_set.id().to_string(),
            name: lane_set.name().to_string(),
            lanes: lane_set.lanes().iter().map(LaneRecord::from).collect(),
        }
    }
}

impl DiagramDocument {
    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the document as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Captures the current state of `diagram`.
    pub fn from_diagram(diagram: &ProcessDiagram) -> Self {
        let nodes = diagram
            .nodes()
            .map(|node| NodeRecord {
                id: node.id().to_string(),
                kind: node.kind(),
                name: node.name().map(str::to_string),
                bounds: diagram
                    .shape(node.id())
                    .map(|shape| shape.bounds())
                    .unwrap_or_default()
                    .into(),
            })
            .collect();

        let flows = diagram
            .flows()
            .map(|flow| FlowRecord {
                id: flow.id().to_string(),
                source: flow.source().to_string(),
                target: flow.target().to_string(),
                waypoints: diagram
                    .connector(flow.id())
                    .map(|connector| {
                        connector
                            .waypoints()
                            .iter()
                            .copied()
                            .map(PointRecord::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            nodes,
            flows,
            lane_set: diagram.lane_set().map(LaneSetRecord::from),
        }
    }

    /// Builds the in-memory model.
    ///
    /// Nodes are added before flows, each in document order.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for a duplicate id or a flow whose endpoint
    /// is not a node of the document.
    pub fn to_diagram(&self) -> Result<ProcessDiagram, ModelError> {
        let mut diagram = ProcessDiagram::new();

        for record in &self.nodes {
            let mut node = Node::new(Id::new(&record.id), record.kind);
            if let Some(name) = &record.name {
                node = node.with_name(name.as_str());
            }
            diagram.add_node(node, record.bounds.into())?;
        }

        for record in &self.flows {
            let flow = SequenceFlow::new(
                Id::new(&record.id),
                Id::new(&record.source),
                Id::new(&record.target),
            );
            let waypoints = record.waypoints.iter().copied().map(Point::from).collect();
            diagram.add_flow(flow, waypoints)?;
        }

        Ok(diagram)
    }
}

/// One row of an event log: the activity and the role that performed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub activity: String,
    pub role: String,
}

/// A role assignment as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleDocument {
    Map(IndexMap<String, String>),
    Records(Vec<RoleRecord>),
}

impl RoleDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<RoleDocument> for RoleAssignment {
    fn from(document: RoleDocument) -> Self {
        match document {
            RoleDocument::Map(map) => RoleAssignment::from_records(map),
            RoleDocument::Records(records) => records
                .into_iter()
                .map(|record| (record.activity, record.role))
                .collect(),
        }
    }
}
