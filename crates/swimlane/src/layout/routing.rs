//! Connector routing.
//!
//! Every sequence flow is redrawn from the right-edge midpoint of its source
//! shape to the left-edge midpoint of its target shape. Endpoints that are
//! close horizontally get a straight segment. Endpoints further apart get a
//! four-point path that leaves the source, runs along a horizontal channel
//! and comes back down (or up) into the target:
//!
//! ```text
//!   same lane                         different lanes
//!
//!     ┌──────────────┐                  start ──┐
//!     │              │                          │
//!   start           end                         └──────────┐
//!                                                          │
//!                                                         end
//! ```
//!
//! A same-lane channel runs `lift` units above the source. A cross-lane
//! channel sits between source and target, at most half a lane away from the
//! source. Channels and corners carry a small random jitter so parallel
//! connectors do not draw on top of each other.

use log::{info, trace};
use rand::Rng;

use swimlane_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    process::{ProcessDiagram, SequenceFlow},
};

use crate::{config::RoutingConfig, layout::LayoutError};

/// Computes the waypoints of a connector from `source` to `target`.
///
/// The first point is always `source.right_mid()` and the last point is
/// always `target.left_mid()`; only the intermediate points depend on the
/// jitter drawn from `rng`.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use swimlane::{
///     config::RoutingConfig,
///     geometry::{Bounds, Point, Size},
///     layout::route,
/// };
///
/// let size = Size::new(100.0, 40.0);
/// let a = Bounds::new_from_top_left(Point::new(0.0, 80.0), size);
/// let b = Bounds::new_from_top_left(Point::new(150.0, 80.0), size);
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let points = route(a, b, &RoutingConfig::default(), 200.0, &mut rng);
/// assert_eq!(points, [Point::new(100.0, 100.0), Point::new(150.0, 100.0)]);
/// ```
pub fn route<R: Rng + ?Sized>(
    source: Bounds,
    target: Bounds,
    config: &RoutingConfig,
    lane_height: f32,
    rng: &mut R,
) -> Vec<Point> {
    let start = source.right_mid();
    let end = target.left_mid();

    let gap = end.y() - start.y();
    let distance = end.sub_point(start).abs();

    if distance.x() < config.near_threshold() {
        return vec![start, end];
    }

    let shift = config.shift().sample(rng);
    let bias = config.bias().sample(rng);

    let channel = if distance.y() < config.same_lane_threshold() {
        start.y() - config.lift() + shift
    } else {
        let reach = (gap.abs() / 2.0).min(lane_height / 2.0);
        start.y() + gap.signum() * reach + shift
    };

    vec![
        start,
        Point::new(start.x() + bias, channel),
        Point::new(end.x() - bias, channel),
        end,
    ]
}

/// Replaces the waypoints of every connector in the diagram.
///
/// Returns the number of connectors routed.
///
/// # Errors
///
/// Returns [`LayoutError::MissingShape`] when a flow endpoint has no shape
/// and [`LayoutError::MissingConnector`] when a flow has no connector.
pub(crate) fn route_connectors<R: Rng + ?Sized>(
    diagram: &mut ProcessDiagram,
    config: &RoutingConfig,
    lane_height: f32,
    rng: &mut R,
) -> Result<usize, LayoutError> {
    let flows: Vec<SequenceFlow> = diagram.flows().copied().collect();

    for flow in &flows {
        let source = shape_bounds(diagram, flow.source())?;
        let target = shape_bounds(diagram, flow.target())?;
        let waypoints = route(source, target, config, lane_height, rng);
        trace!(
            flow = flow.id().to_string(),
            points = waypoints.len();
            "Connector routed"
        );

        diagram
            .connector_mut(flow.id())
            .ok_or(LayoutError::MissingConnector(flow.id()))?
            .set_waypoints(waypoints);
    }

    info!(connectors_count = flows.len(); "Connectors routed");
    Ok(flows.len())
}

fn shape_bounds(diagram: &ProcessDiagram, id: Id) -> Result<Bounds, LayoutError> {
    diagram
        .shape(id)
        .map(|shape| shape.bounds())
        .ok_or(LayoutError::MissingShape(id))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use swimlane_core::{
        geometry::Size,
        process::{Node, NodeKind},
    };

    use super::*;
    use crate::config::JitterRange;

    fn task_at(x: f32, y: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(100.0, 40.0))
    }

    fn steady() -> RoutingConfig {
        RoutingConfig::default().with_jitter(JitterRange::fixed(0.0), JitterRange::fixed(0.0))
    }

    #[test]
    fn test_near_same_lane_is_straight() {
        let mut rng = StdRng::seed_from_u64(0);
        let points = route(task_at(0.0, 80.0), task_at(200.0, 80.0), &steady(), 200.0, &mut rng);

        assert_eq!(points, [Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
    }

    #[test]
    fn test_near_different_lanes_is_straight() {
        let mut rng = StdRng::seed_from_u64(0);
        let points = route(task_at(0.0, 80.0), task_at(150.0, 480.0), &steady(), 200.0, &mut rng);

        assert_eq!(points, [Point::new(100.0, 100.0), Point::new(150.0, 500.0)]);
    }

    #[test]
    fn test_far_same_lane_detours_above_source() {
        let mut rng = StdRng::seed_from_u64(0);
        let points = route(task_at(0.0, 80.0), task_at(400.0, 100.0), &steady(), 200.0, &mut rng);

        assert_eq!(
            points,
            [
                Point::new(100.0, 100.0),
                Point::new(100.0, 20.0),
                Point::new(400.0, 20.0),
                Point::new(400.0, 120.0),
            ]
        );
    }

    #[test]
    fn test_far_different_lanes_channel_between() {
        let mut rng = StdRng::seed_from_u64(0);

        let down = route(task_at(0.0, 80.0), task_at(400.0, 280.0), &steady(), 200.0, &mut rng);
        assert_approx_eq!(f32, down[1].y(), 200.0);
        assert_approx_eq!(f32, down[2].y(), 200.0);

        let up = route(task_at(0.0, 480.0), task_at(400.0, 80.0), &steady(), 200.0, &mut rng);
        // Capped at half a lane above the source.
        assert_approx_eq!(f32, up[1].y(), 400.0);
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RoutingConfig::default();

        for _ in 0..200 {
            let points = route(task_at(0.0, 80.0), task_at(400.0, 80.0), &config, 200.0, &mut rng);
            let bias = points[1].x() - 100.0;
            let shift = points[1].y() - (100.0 - 80.0);
            assert!((1.0..=5.0).contains(&bias), "bias {bias}");
            assert!((-25.0..=15.0).contains(&shift), "shift {shift}");
            assert_approx_eq!(f32, points[2].x(), 400.0 - bias);
        }
    }

    #[test]
    fn test_seeded_routes_are_reproducible() {
        let config = RoutingConfig::default();
        let route_with = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            route(task_at(0.0, 80.0), task_at(400.0, 480.0), &config, 200.0, &mut rng)
        };

        assert_eq!(route_with(9), route_with(9));
    }

    #[test]
    fn test_route_connectors_replaces_waypoints() {
        let mut diagram = ProcessDiagram::new();
        for (id, x) in [("a", 0.0), ("b", 400.0)] {
            diagram
                .add_node(
                    Node::new(Id::new(id), NodeKind::Task).with_name(id),
                    task_at(x, 80.0),
                )
                .unwrap();
        }
        diagram
            .add_flow(
                SequenceFlow::new(Id::new("f"), Id::new("a"), Id::new("b")),
                vec![Point::new(-1.0, -1.0)],
            )
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let routed = route_connectors(&mut diagram, &steady(), 200.0, &mut rng).unwrap();

        assert_eq!(routed, 1);
        let waypoints = diagram.connector(Id::new("f")).unwrap().waypoints();
        assert_eq!(waypoints.len(), 4);
        assert_eq!(waypoints[0], Point::new(100.0, 100.0));
        assert_eq!(waypoints[3], Point::new(400.0, 100.0));
    }
}
