//! Configuration types for the swimlane layout engine.
//!
//! Every tunable the engine uses lives here; nothing in the layout stages is a
//! hard-coded magic number. All types implement [`serde::Deserialize`] with
//! field-level defaults, so a configuration file only needs to name the
//! values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LaneConfig`] - Lane geometry and task placement inside a lane.
//! - [`OverlapConfig`] - Thresholds for detecting near-coincident shapes.
//! - [`RoutingConfig`] - Connector routing thresholds and cosmetic jitter.
//!
//! # Example
//!
//! ```
//! # use swimlane::config::{AppConfig, LaneConfig};
//! let config = AppConfig::default();
//! assert_eq!(config.lanes().lane_height(), 200.0);
//!
//! let tall = AppConfig::default().with_lanes(LaneConfig::default().with_lane_height(300.0));
//! assert_eq!(tall.lanes().lane_height(), 300.0);
//! ```

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

/// A configuration value the layout engine cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` range is inverted: min {min} is greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

fn check_finite(field: &'static str, value: f32) -> Result<(), InvalidConfig> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfig::NonFinite { field, value })
    }
}

/// Top-level configuration combining lane, overlap and routing settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Lane configuration section.
    #[serde(default)]
    lanes: LaneConfig,

    /// Overlap detection section.
    #[serde(default)]
    overlap: OverlapConfig,

    /// Connector routing section.
    #[serde(default)]
    routing: RoutingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(lanes: LaneConfig, overlap: OverlapConfig, routing: RoutingConfig) -> Self {
        Self {
            lanes,
            overlap,
            routing,
        }
    }

    pub fn lanes(&self) -> &LaneConfig {
        &self.lanes
    }

    pub fn overlap(&self) -> &OverlapConfig {
        &self.overlap
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    pub fn with_lanes(mut self, lanes: LaneConfig) -> Self {
        self.lanes = lanes;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapConfig) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    /// Checks every value the layout stages compute with.
    ///
    /// Deserialization already rejects malformed jitter ranges; this also
    /// covers the plain numeric fields and configurations built in code.
    ///
    /// # Errors
    ///
    /// Returns the first non-finite value, a lane height that is not
    /// positive, or an inverted jitter range.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let lanes = &self.lanes;
        check_finite("lanes.lane_height", lanes.lane_height)?;
        if lanes.lane_height <= 0.0 {
            return Err(InvalidConfig::NotPositive {
                field: "lanes.lane_height",
                value: lanes.lane_height,
            });
        }
        check_finite("lanes.left_shift", lanes.left_shift)?;
        check_finite("lanes.right_margin", lanes.right_margin)?;
        check_finite("lanes.top_shift", lanes.top_shift)?;
        check_finite("lanes.task_offset", lanes.task_offset)?;

        check_finite("overlap.max_h_diff", self.overlap.max_h_diff)?;
        check_finite("overlap.max_v_diff", self.overlap.max_v_diff)?;

        let routing = &self.routing;
        check_finite("routing.same_lane_threshold", routing.same_lane_threshold)?;
        check_finite("routing.near_threshold", routing.near_threshold)?;
        check_finite("routing.lift", routing.lift)?;
        routing.shift.check("routing.shift")?;
        routing.bias.check("routing.bias")
    }
}

/// Lane geometry.
///
/// The first lane is pulled `left_shift` units left and `top_shift` units up
/// from the diagram's top-left extent so the lane header has room. Every lane
/// is `lane_height` tall and `extent width + right_margin` wide.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    lane_height: f32,
    left_shift: f32,
    right_margin: f32,
    top_shift: f32,
    /// Added to the lane's vertical midpoint to get a task's top edge.
    task_offset: f32,
    lane_set_name: String,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_height: 200.0,
            left_shift: 100.0,
            right_margin: 250.0,
            top_shift: 20.0,
            task_offset: -18.0,
            lane_set_name: "custom_laneSet".to_string(),
        }
    }
}

impl LaneConfig {
    pub fn lane_height(&self) -> f32 {
        self.lane_height
    }

    pub fn left_shift(&self) -> f32 {
        self.left_shift
    }

    pub fn right_margin(&self) -> f32 {
        self.right_margin
    }

    pub fn top_shift(&self) -> f32 {
        self.top_shift
    }

    pub fn task_offset(&self) -> f32 {
        self.task_offset
    }

    pub fn lane_set_name(&self) -> &str {
        &self.lane_set_name
    }

    /// Vertical distance from a lane's top edge to its midpoint.
    pub fn half_height(&self) -> f32 {
        self.lane_height / 2.0
    }

    pub fn with_lane_height(mut self, lane_height: f32) -> Self {
        self.lane_height = lane_height;
        self
    }

    pub fn with_margins(mut self, left_shift: f32, top_shift: f32, right_margin: f32) -> Self {
        self.left_shift = left_shift;
        self.top_shift = top_shift;
        self.right_margin = right_margin;
        self
    }

    pub fn with_task_offset(mut self, task_offset: f32) -> Self {
        self.task_offset = task_offset;
        self
    }
}

/// Thresholds below which two shapes count as overlapping.
///
/// Distances are measured between shape top-left corners.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    max_h_diff: f32,
    max_v_diff: f32,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            max_h_diff: 50.0,
            max_v_diff: 30.0,
        }
    }
}

impl OverlapConfig {
    pub fn new(max_h_diff: f32, max_v_diff: f32) -> Self {
        Self {
            max_h_diff,
            max_v_diff,
        }
    }

    pub fn max_h_diff(&self) -> f32 {
        self.max_h_diff
    }

    pub fn max_v_diff(&self) -> f32 {
        self.max_v_diff
    }
}

/// An inclusive range a jitter value is drawn from.
///
/// Deserializing a range with a non-finite bound or with `min > max` fails.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "JitterBounds")]
pub struct JitterRange {
    min: f32,
    max: f32,
}

/// Unchecked wire form of [`JitterRange`].
#[derive(Deserialize)]
struct JitterBounds {
    min: f32,
    max: f32,
}

impl TryFrom<JitterBounds> for JitterRange {
    type Error = InvalidConfig;

    fn try_from(bounds: JitterBounds) -> Result<Self, Self::Error> {
        Self::try_new(bounds.min, bounds.max)
    }
}

impl JitterRange {
    /// Creates a range without checking it. See [`JitterRange::try_new`].
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Creates a range, rejecting non-finite bounds and `min > max`.
    pub fn try_new(min: f32, max: f32) -> Result<Self, InvalidConfig> {
        let range = Self::new(min, max);
        range.check("jitter")?;
        Ok(range)
    }

    fn check(&self, field: &'static str) -> Result<(), InvalidConfig> {
        check_finite(field, self.min)?;
        check_finite(field, self.max)?;
        if self.min > self.max {
            return Err(InvalidConfig::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// A degenerate range that always yields `value`.
    pub fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Draws a value from `[min, max]`.
    ///
    /// A range that [`JitterRange::try_new`] would reject never reaches the
    /// generator: an empty or inverted range yields `min`, and a range with a
    /// non-finite bound yields no jitter at all.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if !self.min.is_finite() || !self.max.is_finite() {
            return 0.0;
        }
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

/// Connector routing thresholds.
///
/// `shift` and `bias` are purely cosmetic: they keep parallel connectors from
/// being drawn on top of each other. `seed` makes them reproducible.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    same_lane_threshold: f32,
    near_threshold: f32,
    /// How far above the source a same-lane detour runs.
    lift: f32,
    shift: JitterRange,
    bias: JitterRange,
    seed: Option<u64>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            same_lane_threshold: 150.0,
            near_threshold: 125.0,
            lift: 80.0,
            shift: JitterRange::new(-25.0, 15.0),
            bias: JitterRange::new(1.0, 5.0),
            seed: None,
        }
    }
}

impl RoutingConfig {
    pub fn same_lane_threshold(&self) -> f32 {
        self.same_lane_threshold
    }

    pub fn near_threshold(&self) -> f32 {
        self.near_threshold
    }

    pub fn lift(&self) -> f32 {
        self.lift
    }

    /// Vertical jitter applied to detour channels.
    pub fn shift(&self) -> JitterRange {
        self.shift
    }

    /// Horizontal jitter applied to detour corners.
    pub fn bias(&self) -> JitterRange {
        self.bias
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn with_thresholds(mut self, same_lane_threshold: f32, near_threshold: f32) -> Self {
        self.same_lane_threshold = same_lane_threshold;
        self.near_threshold = near_threshold;
        self
    }

    pub fn with_jitter(mut self, shift: JitterRange, bias: JitterRange) -> Self {
        self.shift = shift;
        self.bias = bias;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
