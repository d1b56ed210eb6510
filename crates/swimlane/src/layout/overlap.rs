//! Overlap resolution.
//!
//! After repositioning, shapes that ended up on top of each other are spread
//! apart vertically. Two shapes conflict when the horizontal and the vertical
//! distance between their top-left corners are both below the configured
//! thresholds.
//!
//! Detection runs once over a snapshot of the shapes taken before anything
//! moves. Every shape contributes its conflict group (itself plus every shape
//! it conflicts with); identical groups are handled once. Groups are then
//! resolved in order against the current geometry:
//!
//! - a pair moves its upper shape up and its lower shape down by a quarter
//!   lane each,
//! - a triple moves its top shape up and its bottom shape down by the
//!   tallest member's height and leaves the middle one in place,
//! - larger groups are left alone and reported as unresolved.
//!
//! A pair or triple whose members are already further apart than the
//! vertical threshold (because an earlier group moved them) is skipped.

use indexmap::IndexSet;
use log::{debug, info, warn};

use swimlane_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    process::ProcessDiagram,
};

use crate::{config::OverlapConfig, layout::LayoutError};

/// The outcome of one overlap resolution pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlapReport {
    resolved: Vec<Vec<Id>>,
    unresolved: Vec<Vec<Id>>,
}

impl OverlapReport {
    /// Groups that were spread apart, members ordered top to bottom.
    pub fn resolved(&self) -> &[Vec<Id>] {
        &self.resolved
    }

    /// Groups larger than three, which this pass does not handle.
    pub fn unresolved(&self) -> &[Vec<Id>] {
        &self.unresolved
    }

    /// Returns `true` when no group was left unresolved.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Detects conflict groups and spreads them apart.
///
/// # Errors
///
/// Returns [`LayoutError::MissingShape`] if a shape disappears between
/// detection and resolution, which only happens on a corrupted diagram.
pub(crate) fn resolve_overlaps(
    diagram: &mut ProcessDiagram,
    config: &OverlapConfig,
    lane_height: f32,
) -> Result<OverlapReport, LayoutError> {
    let snapshot: Vec<(Id, Bounds)> = diagram
        .shapes()
        .map(|shape| (shape.element(), shape.bounds()))
        .collect();
    let groups = conflict_groups(&snapshot, config);

    let mut report = OverlapReport::default();
    for group in groups {
        let members: Vec<Id> = group.iter().map(|&index| snapshot[index].0).collect();
        let current = members
            .iter()
            .map(|&id| {
                diagram
                    .shape(id)
                    .map(|shape| shape.bounds())
                    .ok_or(LayoutError::MissingShape(id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let moves = match current.as_slice() {
            [upper, lower] => {
                if vertical_gap(*upper, *lower) > config.max_v_diff() {
                    debug!(group = describe(&members); "Pair already apart, skipping");
                    continue;
                }
                let step = lane_height / 4.0;
                vec![(members[0], -step), (members[1], step)]
            }
            [top, middle, bottom] => {
                let spread = [(*top, *middle), (*top, *bottom), (*middle, *bottom)]
                    .into_iter()
                    .any(|(a, b)| vertical_gap(a, b) > config.max_v_diff());
                if spread {
                    debug!(group = describe(&members); "Triple already apart, skipping");
                    continue;
                }
                let step = top.height().max(middle.height()).max(bottom.height());
                vec![(members[0], -step), (members[2], step)]
            }
            _ => {
                warn!(
                    size = members.len(),
                    group = describe(&members);
                    "Unresolved overlap: conflict groups larger than three are left in place"
                );
                report.unresolved.push(members);
                continue;
            }
        };

        for (id, dy) in moves {
            let shape = diagram
                .shape_mut(id)
                .ok_or(LayoutError::MissingShape(id))?;
            shape.set_bounds(shape.bounds().translate(Point::new(0.0, dy)));
        }
        debug!(group = describe(&members); "Overlap resolved");
        report.resolved.push(members);
    }

    info!(
        resolved = report.resolved.len(),
        unresolved = report.unresolved.len();
        "Overlaps processed"
    );
    Ok(report)
}

/// Returns the distinct conflict groups as snapshot indices.
///
/// Members are ordered top to bottom (ties by snapshot order), which makes
/// groups found from different members compare equal.
fn conflict_groups(snapshot: &[(Id, Bounds)], config: &OverlapConfig) -> IndexSet<Vec<usize>> {
    let mut groups = IndexSet::new();
    for (i, (_, bounds)) in snapshot.iter().enumerate() {
        let mut group: Vec<usize> = snapshot
            .iter()
            .enumerate()
            .filter(|(j, (_, other))| *j == i || conflicts(*bounds, *other, config))
            .map(|(j, _)| j)
            .collect();
        if group.len() < 2 {
            continue;
        }
        group.sort_by(|&a, &b| {
            snapshot[a]
                .1
                .min_y()
                .total_cmp(&snapshot[b].1.min_y())
                .then(a.cmp(&b))
        });
        groups.insert(group);
    }
    groups
}

fn conflicts(a: Bounds, b: Bounds, config: &OverlapConfig) -> bool {
    let distance = a.min_point().sub_point(b.min_point()).abs();
    distance.x() < config.max_h_diff() && distance.y() < config.max_v_diff()
}

fn vertical_gap(a: Bounds, b: Bounds) -> f32 {
    (a.min_y() - b.min_y()).abs()
}

fn describe(members: &[Id]) -> String {
    members
        .iter()
        .map(Id::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use swimlane_core::{
        geometry::Size,
        process::{Node, NodeKind},
    };

    use super::*;

    fn check_pair_gap_grows_by_half_a_lane(y1: f32, dy: f32, dx: f32, lane_height: f32) {
        let mut diagram = ProcessDiagram::new();
        for (id, x, y) in [("a", 100.0, y1), ("b", 100.0 + dx, y1 + dy)] {
            diagram
                .add_node(
                    Node::new(Id::new(id), NodeKind::Task).with_name(id),
                    Bounds::new_from_top_left(Point::new(x, y), Size::new(80.0, 40.0)),
                )
                .unwrap();
        }
        let before = dy.abs();

        resolve_overlaps(&mut diagram, &OverlapConfig::new(20.0, 20.0), lane_height).unwrap();

        let a = diagram.shape(Id::new("a")).unwrap().bounds().min_y();
        let b = diagram.shape(Id::new("b")).unwrap().bounds().min_y();
        let after = (a - b).abs();
        assert!(
            approx_eq!(f32, after, before + lane_height / 2.0, epsilon = 0.01),
            "gap {before} became {after}"
        );
    }

    proptest! {
        #[test]
        fn prop_pair_gap_grows_by_half_a_lane(
            y1 in -500.0f32..500.0,
            dy in -19.0f32..19.0,
            dx in -19.0f32..19.0,
            lane_height in 100.0f32..400.0,
        ) {
            check_pair_gap_grows_by_half_a_lane(y1, dy, dx, lane_height);
        }
    }
}
