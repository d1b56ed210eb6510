//! The process graph model.
//!
//! A [`ProcessDiagram`] holds the logical process (nodes and sequence flows)
//! together with its geometric overlay (one [`Shape`] per node, one
//! [`Connector`] per flow) and, once lanes have been built, the [`LaneSet`].
//!
//! # Architecture
//!
//! All collections are insertion-ordered maps keyed by [`Id`]. Iteration
//! order is therefore the order in which the discovery service emitted the
//! elements, which makes every "first match wins" decision in the layout
//! engine reproducible.
//!
//! Geometry is mutated in place through [`ProcessDiagram::shape_mut`] and
//! [`ProcessDiagram::connector_mut`]; nodes and flows are never removed.

mod element;
mod lane;

pub use element::{Connector, Node, NodeKind, SequenceFlow, Shape};
pub use lane::{Lane, LaneSet};

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::ModelError,
    geometry::{Bounds, Point},
    identifier::Id,
};

/// The top-left and top-right extent of all shapes in a diagram.
///
/// Both corners are measured on shape top-left coordinates, so `max_x` is the
/// left edge of the rightmost shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min_x: f32,
    min_y: f32,
    max_x: f32,
}

impl Extent {
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn top_left(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn top_right(self) -> Point {
        Point::new(self.max_x, self.min_y)
    }
}

/// A process graph plus its diagram geometry.
///
/// # Examples
///
/// ```
/// use swimlane_core::{
///     geometry::{Bounds, Point, Size},
///     identifier::Id,
///     process::{Node, NodeKind, ProcessDiagram, SequenceFlow},
/// };
///
/// let mut diagram = ProcessDiagram::new();
/// let task_size = Size::new(100.0, 36.0);
/// diagram
///     .add_node(
///         Node::new(Id::new("a"), NodeKind::Task).with_name("Register"),
///         Bounds::new_from_top_left(Point::new(0.0, 0.0), task_size),
///     )
///     .unwrap();
/// diagram
///     .add_node(
///         Node::new(Id::new("b"), NodeKind::Task).with_name("Analyze"),
///         Bounds::new_from_top_left(Point::new(150.0, 0.0), task_size),
///     )
///     .unwrap();
/// diagram
///     .add_flow(SequenceFlow::new(Id::new("f1"), Id::new("a"), Id::new("b")), Vec::new())
///     .unwrap();
///
/// assert_eq!(diagram.node(Id::new("a")).unwrap().outgoing(), &[Id::new("f1")]);
/// assert_eq!(diagram.tasks().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessDiagram {
    nodes: IndexMap<Id, Node>,
    flows: IndexMap<Id, SequenceFlow>,
    shapes: IndexMap<Id, Shape>,
    connectors: IndexMap<Id, Connector>,
    lane_set: Option<LaneSet>,
}

impl ProcessDiagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node together with its shape bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if an element with the same id exists.
    pub fn add_node(&mut self, node: Node, bounds: Bounds) -> Result<(), ModelError> {
        let id = node.id();
        if self.contains(id) {
            return Err(ModelError::DuplicateId(id));
        }

        trace!(node_id = id.to_string(), kind = node.kind().to_string(); "Adding node");
        self.shapes.insert(id, Shape::new(id, bounds));
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Adds a sequence flow together with its initial waypoints.
    ///
    /// The flow id is appended to the source node's outgoing list and to the
    /// target node's incoming list.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if an element with the same id
    /// exists, or [`ModelError::DanglingFlow`] if either endpoint is unknown.
    pub fn add_flow(
        &mut self,
        flow: SequenceFlow,
        waypoints: Vec<Point>,
    ) -> Result<(), ModelError> {
        let id = flow.id();
        if self.contains(id) {
            return Err(ModelError::DuplicateId(id));
        }
        for endpoint in [flow.source(), flow.target()] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(ModelError::DanglingFlow {
                    flow: id,
                    node: endpoint,
                });
            }
        }

        trace!(
            flow_id = id.to_string(),
            source = flow.source().to_string(),
            target = flow.target().to_string();
            "Adding sequence flow"
        );
        if let Some(source) = self.nodes.get_mut(&flow.source()) {
            source.push_outgoing(id);
        }
        if let Some(target) = self.nodes.get_mut(&flow.target()) {
            target.push_incoming(id);
        }
        self.connectors.insert(id, Connector::new(id, waypoints));
        self.flows.insert(id, flow);
        Ok(())
    }

    fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id) || self.flows.contains_key(&id)
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the nodes of one kind in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |node| node.kind() == kind)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Node> {
        self.nodes_of_kind(NodeKind::Task)
    }

    /// Returns exclusive and parallel gateways in insertion order.
    pub fn gateways(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| node.kind().is_gateway())
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns all sequence flows in insertion order.
    pub fn flows(&self) -> impl Iterator<Item = &SequenceFlow> {
        self.flows.values()
    }

    /// Returns the shape drawn for the node `element`.
    pub fn shape(&self, element: Id) -> Option<&Shape> {
        self.shapes.get(&element)
    }

    pub fn shape_mut(&mut self, element: Id) -> Option<&mut Shape> {
        self.shapes.get_mut(&element)
    }

    /// Returns all node shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Returns the connector drawn for the sequence flow `element`.
    pub fn connector(&self, element: Id) -> Option<&Connector> {
        self.connectors.get(&element)
    }

    pub fn connector_mut(&mut self, element: Id) -> Option<&mut Connector> {
        self.connectors.get_mut(&element)
    }

    pub fn lane_set(&self) -> Option<&LaneSet> {
        self.lane_set.as_ref()
    }

    pub fn lane_set_mut(&mut self) -> Option<&mut LaneSet> {
        self.lane_set.as_mut()
    }

    /// Installs the lane set, replacing any previous one.
    pub fn set_lane_set(&mut self, lane_set: LaneSet) {
        self.lane_set = Some(lane_set);
    }

    /// Computes the top-left and top-right extent over all node shapes.
    ///
    /// Returns `None` when the diagram has no shapes.
    pub fn extent(&self) -> Option<Extent> {
        let mut bounds = self.shapes.values().map(Shape::bounds);
        let first = bounds.next()?;
        let init = Extent {
            min_x: first.min_x(),
            min_y: first.min_y(),
            max_x: first.min_x(),
        };
        Some(bounds.fold(init, |extent, b| Extent {
            min_x: extent.min_x.min(b.min_x()),
            min_y: extent.min_y.min(b.min_y()),
            max_x: extent.max_x.max(b.min_x()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn bounds(x: f32, y: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(100.0, 36.0))
    }

    fn task(id: &str, name: &str) -> Node {
        Node::new(Id::new(id), NodeKind::Task).with_name(name)
    }

    #[test]
    fn test_empty_diagram() {
        let diagram = ProcessDiagram::new();

        assert_eq!(diagram.nodes_count(), 0);
        assert_eq!(diagram.flows().count(), 0);
        assert!(diagram.extent().is_none());
        assert!(diagram.lane_set().is_none());
    }

    #[test]
    fn test_add_node_creates_shape() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("t1", "Register"), bounds(10.0, 20.0)).unwrap();

        let shape = diagram.shape(Id::new("t1")).expect("shape exists");
        assert_eq!(shape.id(), "t1_di");
        assert_eq!(shape.bounds(), bounds(10.0, 20.0));
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("t1", "Register"), bounds(0.0, 0.0)).unwrap();

        let err = diagram
            .add_node(task("t1", "Again"), bounds(0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateId(Id::new("t1")));
    }

    #[test]
    fn test_add_flow_updates_incoming_and_outgoing() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("a", "A"), bounds(0.0, 0.0)).unwrap();
        diagram.add_node(task("b", "B"), bounds(150.0, 0.0)).unwrap();
        diagram.add_node(task("c", "C"), bounds(300.0, 0.0)).unwrap();
        diagram
            .add_flow(SequenceFlow::new(Id::new("f1"), Id::new("a"), Id::new("b")), Vec::new())
            .unwrap();
        diagram
            .add_flow(SequenceFlow::new(Id::new("f2"), Id::new("a"), Id::new("c")), Vec::new())
            .unwrap();

        let a = diagram.node(Id::new("a")).unwrap();
        assert_eq!(a.outgoing(), &[Id::new("f1"), Id::new("f2")]);
        assert!(a.incoming().is_empty());
        assert_eq!(diagram.node(Id::new("c")).unwrap().incoming(), &[Id::new("f2")]);
        assert_eq!(diagram.connector(Id::new("f2")).unwrap().id(), "f2_di");
    }

    #[test]
    fn test_dangling_flow_is_rejected() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("a", "A"), bounds(0.0, 0.0)).unwrap();

        let err = diagram
            .add_flow(
                SequenceFlow::new(Id::new("f1"), Id::new("a"), Id::new("ghost")),
                Vec::new(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DanglingFlow {
                flow: Id::new("f1"),
                node: Id::new("ghost"),
            }
        );
        // Nothing was wired up.
        assert!(diagram.node(Id::new("a")).unwrap().outgoing().is_empty());
    }

    #[test]
    fn test_flow_id_cannot_shadow_node_id() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("a", "A"), bounds(0.0, 0.0)).unwrap();

        let err = diagram
            .add_flow(SequenceFlow::new(Id::new("a"), Id::new("a"), Id::new("a")), Vec::new())
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateId(Id::new("a")));
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let mut diagram = ProcessDiagram::new();
        for id in ["z", "a", "m"] {
            diagram.add_node(task(id, id), bounds(0.0, 0.0)).unwrap();
        }

        let ids: Vec<String> = diagram.nodes().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_kind_filters() {
        let mut diagram = ProcessDiagram::new();
        diagram
            .add_node(Node::new(Id::new("s"), NodeKind::StartEvent), bounds(0.0, 0.0))
            .unwrap();
        diagram.add_node(task("t", "T"), bounds(50.0, 0.0)).unwrap();
        diagram
            .add_node(Node::new(Id::new("x"), NodeKind::ExclusiveGateway), bounds(100.0, 0.0))
            .unwrap();
        diagram
            .add_node(Node::new(Id::new("p"), NodeKind::ParallelGateway), bounds(150.0, 0.0))
            .unwrap();

        assert_eq!(diagram.tasks().count(), 1);
        assert_eq!(diagram.gateways().count(), 2);
        assert_eq!(diagram.nodes_of_kind(NodeKind::StartEvent).count(), 1);
        assert_eq!(diagram.nodes_of_kind(NodeKind::EndEvent).count(), 0);
    }

    #[test]
    fn test_extent_uses_top_left_corners() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("a", "A"), bounds(50.0, 80.0)).unwrap();
        diagram.add_node(task("b", "B"), bounds(400.0, 10.0)).unwrap();
        diagram.add_node(task("c", "C"), bounds(200.0, 300.0)).unwrap();

        let extent = diagram.extent().expect("non-empty diagram");
        assert_eq!(extent.top_left(), Point::new(50.0, 10.0));
        assert_eq!(extent.top_right(), Point::new(400.0, 10.0));
    }

    #[test]
    fn test_shape_mut_updates_geometry() {
        let mut diagram = ProcessDiagram::new();
        diagram.add_node(task("a", "A"), bounds(0.0, 0.0)).unwrap();

        let shape = diagram.shape_mut(Id::new("a")).unwrap();
        let moved = shape.bounds().with_min_y(120.0);
        shape.set_bounds(moved);

        assert_eq!(diagram.shape(Id::new("a")).unwrap().bounds().min_y(), 120.0);
    }
}
