use scanwire_codec::Point;
use tracing::{debug, trace};

use crate::matching::{nearest, point_based_matching, RigidTransform};

/// Iterative closest point tuning.
#[derive(Debug, Clone)]
pub struct AlignConfig {
    /// Upper bound on applied transforms.
    pub max_iterations: usize,
    /// Pairs at this distance or further apart are ignored.
    pub distance_threshold: f64,
    /// Stop once both translation components fall below this.
    pub translation_tolerance: f64,
    /// Stop once the rotation (radians) falls below this.
    pub rotation_tolerance: f64,
    /// Give up when fewer pairs than this are within `distance_threshold`.
    pub min_point_pairs: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            distance_threshold: 1.5,
            translation_tolerance: 1e-3,
            rotation_tolerance: 1e-5,
            min_point_pairs: 10,
        }
    }
}

/// Why [`align`] stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last step was below both tolerances.
    Converged,
    /// Too few flange points had a tread point within range.
    TooFewPairs,
    /// The iteration budget ran out first.
    MaxIterations,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::TooFewPairs => "too_few_pairs",
            Self::MaxIterations => "max_iterations",
        }
    }
}

/// Result of aligning a flange onto a tread.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Flange points with every applied transform folded in.
    pub points: Vec<Point>,
    /// Number of transforms applied.
    pub iterations: usize,
    pub stop: StopReason,
}

/// Move `flange` onto `tread` by iterative closest point.
///
/// The tread is the fixed reference and is never modified. When the first
/// iteration already finds too few pairs the flange comes back unchanged.
pub fn align(flange: &[Point], tread: &[Point], config: &AlignConfig) -> Alignment {
    let max_dist2 = config.distance_threshold * config.distance_threshold;
    let mut points = flange.to_vec();
    let mut pairs = Vec::with_capacity(points.len());

    for iteration in 0..config.max_iterations {
        pairs.clear();
        pairs.extend(points.iter().filter_map(|&p| {
            nearest(p, tread)
                .filter(|&(_, dist2)| dist2 < max_dist2)
                .map(|(index, _)| (p, tread[index]))
        }));

        let transform = match point_based_matching(&pairs) {
            Some(t) if pairs.len() >= config.min_point_pairs => t,
            _ => {
                debug!(iteration, pairs = pairs.len(), "too few point pairs");
                return Alignment {
                    points,
                    iterations: iteration,
                    stop: StopReason::TooFewPairs,
                };
            }
        };

        apply_in_place(&transform, &mut points);
        trace!(
            iteration,
            pairs = pairs.len(),
            rotation = transform.rotation,
            tx = transform.tx,
            ty = transform.ty,
            "icp step"
        );

        if transform.rotation.abs() < config.rotation_tolerance
            && transform.max_translation() < config.translation_tolerance
        {
            debug!(iterations = iteration + 1, "alignment converged");
            return Alignment {
                points,
                iterations: iteration + 1,
                stop: StopReason::Converged,
            };
        }
    }

    debug!(iterations = config.max_iterations, "alignment hit iteration limit");
    Alignment {
        points,
        iterations: config.max_iterations,
        stop: StopReason::MaxIterations,
    }
}

fn apply_in_place(transform: &RigidTransform, points: &mut [Point]) {
    for point in points {
        *point = transform.apply(*point);
    }
}
