//! Lane construction.
//!
//! One lane is built per distinct role. Lanes share a common left edge and
//! width and are stacked top to bottom in the order the roles were first
//! seen, `lane_height` apart:
//!
//! ```text
//!   x0 = minX - left_shift
//!   y0 = minY - top_shift
//!
//!   (x0, y0)            ┌──────────────────────────────┐
//!                       │ lane 0                       │ lane_height
//!   (x0, y0 + h)        ├──────────────────────────────┤
//!                       │ lane 1                       │
//!   (x0, y0 + 2h)       ├──────────────────────────────┤
//!                       ⋮
//!                       └──── maxX - minX + right_margin ┘
//! ```

use log::{debug, info};

use swimlane_core::{
    geometry::{Bounds, Point, Size},
    process::{Lane, LaneSet, ProcessDiagram},
};

use crate::{
    config::LaneConfig,
    layout::LayoutError,
    roles::RoleAssignment,
};

/// Builds the lane set for `roles` and installs it in `diagram`.
///
/// # Errors
///
/// Returns [`LayoutError::EmptyDiagram`] if the diagram has no shapes to
/// measure the extent from.
pub(crate) fn build_lanes(
    diagram: &mut ProcessDiagram,
    roles: &RoleAssignment,
    config: &LaneConfig,
) -> Result<(), LayoutError> {
    let extent = diagram.extent().ok_or(LayoutError::EmptyDiagram)?;

    let origin = Point::new(
        extent.min_x() - config.left_shift(),
        extent.min_y() - config.top_shift(),
    );
    let size = Size::new(
        extent.max_x() - extent.min_x() + config.right_margin(),
        config.lane_height(),
    );

    let mut lane_set = LaneSet::new(config.lane_set_name());
    for (index, role) in roles.roles().enumerate() {
        let top_left = origin.add_point(Point::new(0.0, index as f32 * config.lane_height()));
        let lane = Lane::new(role, index, Bounds::new_from_top_left(top_left, size));
        debug!(
            lane_id = lane.id().to_string(),
            index,
            y = top_left.y();
            "Lane created"
        );
        lane_set.push(lane);
    }

    info!(lanes_count = lane_set.len(); "Lanes built");
    diagram.set_lane_set(lane_set);
    Ok(())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use swimlane_core::{
        identifier::Id,
        process::{Node, NodeKind},
    };

    use super::*;

    fn diagram_with_tasks(positions: &[(&str, f32, f32)]) -> ProcessDiagram {
        let mut diagram = ProcessDiagram::new();
        for (name, x, y) in positions {
            diagram
                .add_node(
                    Node::new(Id::new(name), NodeKind::Task).with_name(*name),
                    Bounds::new_from_top_left(Point::new(*x, *y), Size::new(100.0, 36.0)),
                )
                .unwrap();
        }
        diagram
    }

    #[test]
    fn test_empty_diagram_is_rejected() {
        let mut diagram = ProcessDiagram::new();
        let roles = RoleAssignment::from_records([("A", "Clerk")]);

        let err = build_lanes(&mut diagram, &roles, &LaneConfig::default()).unwrap_err();
        assert_eq!(err, LayoutError::EmptyDiagram);
        assert!(diagram.lane_set().is_none());
    }

    #[test]
    fn test_one_lane_per_distinct_role() {
        let mut diagram =
            diagram_with_tasks(&[("A", 0.0, 0.0), ("B", 150.0, 0.0), ("C", 300.0, 0.0)]);
        let roles =
            RoleAssignment::from_records([("A", "Role 1"), ("B", "Role 2"), ("C", "Role 1")]);

        build_lanes(&mut diagram, &roles, &LaneConfig::default()).unwrap();

        let lane_set = diagram.lane_set().expect("lane set installed");
        assert_eq!(lane_set.id(), "LaneSet_custom_laneSet");
        let names: Vec<&str> = lane_set.lanes().iter().map(Lane::name).collect();
        assert_eq!(names, ["Role_1", "Role_2"]);
        assert_eq!(lane_set.lanes()[1].id(), "Lane_Role_2");
        assert_eq!(lane_set.lanes()[1].shape_id(), "Lane_Role_2_di");
    }

    #[test]
    fn test_lane_geometry() {
        let mut diagram = diagram_with_tasks(&[("A", 120.0, 80.0), ("B", 520.0, 40.0)]);
        let roles = RoleAssignment::from_records([("A", "R1"), ("B", "R2")]);

        build_lanes(&mut diagram, &roles, &LaneConfig::default()).unwrap();

        let lanes = diagram.lane_set().unwrap().lanes();
        // First lane pulled left by 100 and up by 20 from (120, 40).
        assert_approx_eq!(f32, lanes[0].bounds().min_x(), 20.0);
        assert_approx_eq!(f32, lanes[0].bounds().min_y(), 20.0);
        assert_approx_eq!(f32, lanes[0].bounds().width(), 400.0 + 250.0);
        assert_approx_eq!(f32, lanes[0].bounds().height(), 200.0);
        // Second lane directly below, same left edge and width.
        assert_approx_eq!(f32, lanes[1].bounds().min_x(), 20.0);
        assert_approx_eq!(f32, lanes[1].bounds().min_y(), 220.0);
        assert_approx_eq!(f32, lanes[1].bounds().width(), 650.0);
    }

    #[test]
    fn test_custom_lane_height() {
        let mut diagram = diagram_with_tasks(&[("A", 0.0, 0.0)]);
        let roles = RoleAssignment::from_records([("A", "R1"), ("X", "R2"), ("Y", "R3")]);
        let config = LaneConfig::default()
            .with_lane_height(120.0)
            .with_margins(0.0, 0.0, 0.0);

        build_lanes(&mut diagram, &roles, &config).unwrap();

        let tops: Vec<f32> = diagram
            .lane_set()
            .unwrap()
            .lanes()
            .iter()
            .map(Lane::y)
            .collect();
        assert_eq!(tops, [0.0, 120.0, 240.0]);
    }

    #[test]
    fn test_roles_without_tasks_still_get_lanes() {
        let mut diagram = diagram_with_tasks(&[("A", 0.0, 0.0)]);
        let roles = RoleAssignment::from_records([("A", "R1"), ("Unused", "R2")]);

        build_lanes(&mut diagram, &roles, &LaneConfig::default()).unwrap();

        assert_eq!(diagram.lane_set().unwrap().len(), 2);
    }
}
