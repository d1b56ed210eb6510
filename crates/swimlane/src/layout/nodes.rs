//! Node repositioning.
//!
//! Tasks are moved into their role's lane first. Start and end events and
//! gateways have no role of their own, so they borrow the vertical center of
//! an already placed task:
//!
//! - every start event follows the leftmost task,
//! - every end event follows the rightmost task,
//! - every gateway follows the task horizontally closest to it.
//!
//! All searches walk tasks in diagram insertion order and only replace the
//! current candidate on a strictly better match, so the first task found
//! wins a tie. Horizontal positions and box sizes are never touched.

use indexmap::IndexMap;
use log::{debug, info, trace};

use swimlane_core::{
    geometry::Bounds,
    identifier::Id,
    process::{NodeKind, ProcessDiagram},
};

use crate::{config::LaneConfig, layout::LayoutError, roles::RoleAssignment};

/// Vertical centers of placed tasks, keyed by task id, in placement order.
pub type TaskCenters = IndexMap<Id, f32>;

/// Checks that every task can be placed before anything is moved.
///
/// Every role of the assignment becomes a lane id, so an empty role name is
/// rejected even when no task of the diagram carries it.
pub(crate) fn check_assignment(
    diagram: &ProcessDiagram,
    roles: &RoleAssignment,
) -> Result<(), LayoutError> {
    if let Some((task, _)) = roles.iter().find(|(_, role)| role.is_empty()) {
        return Err(LayoutError::EmptyRole {
            task: task.to_string(),
        });
    }
    for task in diagram.tasks() {
        let name = task.name().ok_or(LayoutError::UnnamedTask(task.id()))?;
        if roles.role_of(name).is_none() {
            return Err(LayoutError::UnassignedTask {
                task: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Moves every task into its role's lane.
///
/// A task's top edge becomes `lane_y + lane_height / 2 + task_offset` and its
/// id is recorded in the lane's member list. Returns `lane_y + lane_height / 2`
/// for every task.
///
/// # Errors
///
/// Fails with an assignment error for a task that has no name or no role,
/// and with [`LayoutError::MissingLane`] when lanes were built for a
/// different assignment.
pub(crate) fn place_tasks(
    diagram: &mut ProcessDiagram,
    roles: &RoleAssignment,
    config: &LaneConfig,
) -> Result<TaskCenters, LayoutError> {
    let tasks: Vec<(Id, Option<String>)> = diagram
        .tasks()
        .map(|task| (task.id(), task.name().map(str::to_string)))
        .collect();

    let mut centers = TaskCenters::with_capacity(tasks.len());
    for (id, name) in tasks {
        let name = name.ok_or(LayoutError::UnnamedTask(id))?;
        let role = roles
            .role_of(&name)
            .ok_or_else(|| LayoutError::UnassignedTask { task: name.clone() })?;

        let lane = diagram
            .lane_set_mut()
            .and_then(|lane_set| lane_set.lane_mut(role))
            .ok_or_else(|| LayoutError::MissingLane(role.to_string()))?;
        lane.add_flow_node_ref(id);
        let center_y = lane.y() + config.half_height();

        let shape = diagram
            .shape_mut(id)
            .ok_or(LayoutError::MissingShape(id))?;
        let bounds = shape.bounds().with_min_y(center_y + config.task_offset());
        shape.set_bounds(bounds);

        trace!(task = name, role, y = bounds.min_y(); "Task placed");
        centers.insert(id, center_y);
    }

    info!(tasks_count = centers.len(); "Tasks placed");
    Ok(centers)
}

/// Aligns start events to the leftmost task and end events to the rightmost.
///
/// # Errors
///
/// Returns [`LayoutError::NoReferenceTask`] when the diagram has events but
/// no tasks.
pub(crate) fn place_events(
    diagram: &mut ProcessDiagram,
    centers: &TaskCenters,
) -> Result<(), LayoutError> {
    let anchors = [
        (NodeKind::StartEvent, Extreme::Leftmost),
        (NodeKind::EndEvent, Extreme::Rightmost),
    ];

    for (kind, extreme) in anchors {
        let events: Vec<Id> = diagram.nodes_of_kind(kind).map(|node| node.id()).collect();
        if events.is_empty() {
            continue;
        }

        let reference =
            extreme_task(diagram, extreme)?.ok_or(LayoutError::NoReferenceTask { kind })?;
        let center_y = task_center(diagram, centers, reference)?;
        debug!(
            kind = kind.to_string(),
            reference = reference.to_string(),
            y = center_y;
            "Aligning events"
        );

        for event in events {
            move_center_y(diagram, event, center_y)?;
        }
    }

    Ok(())
}

/// Aligns every gateway to the task horizontally closest to it.
///
/// With no task to align to, a gateway falls back to the vertical center of
/// the first start event.
///
/// # Errors
///
/// Returns [`LayoutError::NoReferenceTask`] when there is neither a task nor
/// a start event to align to.
pub(crate) fn place_gateways(
    diagram: &mut ProcessDiagram,
    centers: &TaskCenters,
) -> Result<(), LayoutError> {
    let gateways: Vec<(Id, NodeKind)> = diagram
        .gateways()
        .map(|node| (node.id(), node.kind()))
        .collect();

    for (id, kind) in gateways {
        let x = shape_bounds(diagram, id)?.min_x();
        let center_y = match nearest_task(diagram, x)? {
            Some(task) => task_center(diagram, centers, task)?,
            None => start_event_center(diagram)?.ok_or(LayoutError::NoReferenceTask { kind })?,
        };

        trace!(gateway = id.to_string(), y = center_y; "Gateway placed");
        move_center_y(diagram, id, center_y)?;
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Leftmost,
    Rightmost,
}

fn shape_bounds(diagram: &ProcessDiagram, id: Id) -> Result<Bounds, LayoutError> {
    diagram
        .shape(id)
        .map(|shape| shape.bounds())
        .ok_or(LayoutError::MissingShape(id))
}

fn extreme_task(diagram: &ProcessDiagram, extreme: Extreme) -> Result<Option<Id>, LayoutError> {
    let mut best: Option<(Id, f32)> = None;
    for task in diagram.tasks() {
        let x = shape_bounds(diagram, task.id())?.min_x();
        let better = match (best, extreme) {
            (None, _) => true,
            (Some((_, best_x)), Extreme::Leftmost) => x < best_x,
            (Some((_, best_x)), Extreme::Rightmost) => x > best_x,
        };
        if better {
            best = Some((task.id(), x));
        }
    }
    Ok(best.map(|(id, _)| id))
}

fn nearest_task(diagram: &ProcessDiagram, x: f32) -> Result<Option<Id>, LayoutError> {
    let mut best: Option<(Id, f32)> = None;
    for task in diagram.tasks() {
        let distance = (shape_bounds(diagram, task.id())?.min_x() - x).abs();
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((task.id(), distance));
        }
    }
    Ok(best.map(|(id, _)| id))
}

fn task_center(
    diagram: &ProcessDiagram,
    centers: &TaskCenters,
    task: Id,
) -> Result<f32, LayoutError> {
    match centers.get(&task) {
        Some(center_y) => Ok(*center_y),
        None => Ok(shape_bounds(diagram, task)?.center().y()),
    }
}

fn start_event_center(diagram: &ProcessDiagram) -> Result<Option<f32>, LayoutError> {
    diagram
        .nodes_of_kind(NodeKind::StartEvent)
        .next()
        .map(|start| shape_bounds(diagram, start.id()).map(|bounds| bounds.center().y()))
        .transpose()
}

fn move_center_y(diagram: &mut ProcessDiagram, id: Id, center_y: f32) -> Result<(), LayoutError> {
    let shape = diagram
        .shape_mut(id)
        .ok_or(LayoutError::MissingShape(id))?;
    shape.set_bounds(shape.bounds().with_center_y(center_y));
    Ok(())
}
