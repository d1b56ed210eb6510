//! Flow elements and their diagram annotations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Point},
    identifier::Id,
};

/// The BPMN element type of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    StartEvent,
    EndEvent,
    Task,
    ExclusiveGateway,
    ParallelGateway,
}

impl NodeKind {
    /// Returns `true` for exclusive and parallel gateways.
    pub fn is_gateway(self) -> bool {
        matches!(self, NodeKind::ExclusiveGateway | NodeKind::ParallelGateway)
    }

    /// Returns `true` for start and end events.
    pub fn is_event(self) -> bool {
        matches!(self, NodeKind::StartEvent | NodeKind::EndEvent)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::StartEvent => "start event",
            NodeKind::EndEvent => "end event",
            NodeKind::Task => "task",
            NodeKind::ExclusiveGateway => "exclusive gateway",
            NodeKind::ParallelGateway => "parallel gateway",
        };
        f.write_str(name)
    }
}

/// A flow node of the process graph.
///
/// Incoming and outgoing lists hold sequence flow ids in the order the flows
/// were added to the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    name: Option<String>,
    incoming: Vec<Id>,
    outgoing: Vec<Id>,
}

impl Node {
    pub fn new(id: Id, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Sets the display name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the display name, if the discovery service assigned one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Ids of sequence flows that end at this node.
    pub fn incoming(&self) -> &[Id] {
        &self.incoming
    }

    /// Ids of sequence flows that start at this node.
    pub fn outgoing(&self) -> &[Id] {
        &self.outgoing
    }

    pub(super) fn push_incoming(&mut self, flow: Id) {
        self.incoming.push(flow);
    }

    pub(super) fn push_outgoing(&mut self, flow: Id) {
        self.outgoing.push(flow);
    }
}

/// A directed control-flow arc between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceFlow {
    id: Id,
    source: Id,
    target: Id,
}

impl SequenceFlow {
    pub fn new(id: Id, source: Id, target: Id) -> Self {
        Self { id, source, target }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }
}

/// The bounding box drawn for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    id: Id,
    element: Id,
    bounds: Bounds,
}

impl Shape {
    pub(super) fn new(element: Id, bounds: Bounds) -> Self {
        Self {
            id: element.suffixed("_di"),
            element,
            bounds,
        }
    }

    /// The diagram-shape id, `<element>_di`.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The id of the node this shape draws.
    pub fn element(&self) -> Id {
        self.element
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

/// The waypoint path drawn for one sequence flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    id: Id,
    element: Id,
    waypoints: Vec<Point>,
}

impl Connector {
    pub(super) fn new(element: Id, waypoints: Vec<Point>) -> Self {
        Self {
            id: element.suffixed("_di"),
            element,
            waypoints,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The id of the sequence flow this connector draws.
    pub fn element(&self) -> Id {
        self.element
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Replaces the whole path.
    pub fn set_waypoints(&mut self, waypoints: Vec<Point>) {
        self.waypoints = waypoints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn test_node_kind_predicates() {
        assert!(NodeKind::ExclusiveGateway.is_gateway());
        assert!(NodeKind::ParallelGateway.is_gateway());
        assert!(!NodeKind::Task.is_gateway());
        assert!(NodeKind::StartEvent.is_event());
        assert!(NodeKind::EndEvent.is_event());
        assert!(!NodeKind::ParallelGateway.is_event());
    }

    #[test]
    fn test_node_with_name() {
        let node = Node::new(Id::new("t1"), NodeKind::Task).with_name("Repair (Simple)");
        assert_eq!(node.name(), Some("Repair (Simple)"));
        assert!(node.incoming().is_empty());
        assert!(node.outgoing().is_empty());
    }

    #[test]
    fn test_shape_and_connector_ids_follow_element() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let shape = Shape::new(Id::new("t1"), bounds);
        let connector = Connector::new(Id::new("f1"), Vec::new());

        assert_eq!(shape.id(), "t1_di");
        assert_eq!(shape.element(), "t1");
        assert_eq!(connector.id(), "f1_di");
        assert_eq!(connector.element(), "f1");
    }
}
