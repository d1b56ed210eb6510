//! Lanes: horizontal bands, one per organizational role.

use crate::{geometry::Bounds, identifier::Id};

/// A horizontal band representing one role.
///
/// The lane's index is its creation order, which is also its stacking order
/// (index 0 is the topmost lane).
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    id: Id,
    name: String,
    index: usize,
    bounds: Bounds,
    flow_node_refs: Vec<Id>,
}

impl Lane {
    /// Creates a lane for `role`. The role must already be normalized.
    pub fn new(role: &str, index: usize, bounds: Bounds) -> Self {
        Self {
            id: Id::prefixed("Lane_", role),
            name: role.to_string(),
            index,
            bounds,
            flow_node_refs: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The diagram-shape id, `Lane_<role>_di`.
    pub fn shape_id(&self) -> Id {
        self.id.suffixed("_di")
    }

    /// The role name this lane represents.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Top edge of the lane band.
    pub fn y(&self) -> f32 {
        self.bounds.min_y()
    }

    /// Returns `true` when `y` lies inside `[top, top + height)`.
    pub fn contains_y(&self, y: f32) -> bool {
        self.bounds.contains_y(y)
    }

    /// Nodes placed in this lane, in placement order.
    pub fn flow_node_refs(&self) -> &[Id] {
        &self.flow_node_refs
    }

    /// Records `node` as a member of this lane. Adding a member twice is a no-op.
    pub fn add_flow_node_ref(&mut self, node: Id) {
        if !self.flow_node_refs.contains(&node) {
            self.flow_node_refs.push(node);
        }
    }
}

/// The container of all lanes in a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSet {
    id: Id,
    name: String,
    lanes: Vec<Lane>,
}

impl LaneSet {
    pub fn new(name: &str) -> Self {
        Self {
            id: Id::prefixed("LaneSet_", name),
            name: name.to_string(),
            lanes: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Looks a lane up by its role name.
    pub fn lane(&self, role: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.name == role)
    }

    pub fn lane_mut(&mut self, role: &str) -> Option<&mut Lane> {
        self.lanes.iter_mut().find(|lane| lane.name == role)
    }

    pub fn push(&mut self, lane: Lane) {
        self.lanes.push(lane);
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
