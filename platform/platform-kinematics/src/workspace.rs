//! Reachable-workspace sampling at a fixed orientation.
//!
//! Every point of a regular translation grid is solved and checked; a point
//! is reachable when all leg lengths are in bounds and no leg is past the
//! angle cutoff. Reachable points are coloured by distance from the
//! reference translation in five ordered bands.
//!
//! Reachability depends only on the orientation, so [`WorkspaceSampler`]
//! caches it per orientation and only recolours when the reference
//! translation moves.

// Axis counts are range-checked before casting; grid indices fit in f64.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use nalgebra::{Point3, Vector3};
use platform_types::{
    Configuration, Orientation, PlatformError, PlatformResult, Pose, require_finite,
    require_positive,
};
use rayon::prelude::*;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::solver::solve_with_transform;
use crate::transform::PoseTransform;
use crate::validation::{ValidationParams, validate_solution};

/// Axis-aligned sampling box, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridBounds {
    /// Lower corner.
    pub min: Point3<f64>,
    /// Upper corner.
    pub max: Point3<f64>,
}

impl Default for GridBounds {
    /// ±80 mm laterally, 120 to 200 mm in height.
    fn default() -> Self {
        Self::new(Point3::new(-80.0, -80.0, 120.0), Point3::new(80.0, 80.0, 200.0))
    }
}

impl GridBounds {
    /// Creates bounds from two corners.
    #[must_use]
    pub const fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box of `half_extent` around `center`.
    #[must_use]
    pub fn centered(center: Point3<f64>, half_extent: Vector3<f64>) -> Self {
        Self::new(center - half_extent, center + half_extent)
    }

    /// Number of samples along each axis for `step`.
    ///
    /// The lower corner is always sampled; the upper corner is sampled when it
    /// falls on the lattice. A count that does not fit in `usize` saturates
    /// to `usize::MAX`.
    #[must_use]
    pub fn axis_counts(&self, step: f64) -> [usize; 3] {
        let count = |min: f64, max: f64| {
            let n = ((max - min) / step + 1e-9).floor().max(0.0) + 1.0;
            if n.is_finite() && n < usize::MAX as f64 {
                n as usize
            } else {
                usize::MAX
            }
        };
        [
            count(self.min.x, self.max.x),
            count(self.min.y, self.max.y),
            count(self.min.z, self.max.z),
        ]
    }

    /// Total number of grid points for `step`.
    #[must_use]
    pub fn point_count(&self, step: f64) -> usize {
        self.axis_counts(step).iter().fold(1_usize, |acc, &n| acc.saturating_mul(n))
    }

    /// Checks that the corners are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFiniteParameter`] or
    /// [`PlatformError::InvalidBounds`].
    pub fn validate(&self) -> PlatformResult<()> {
        for (axis, min, max) in [
            ("x", self.min.x, self.max.x),
            ("y", self.min.y, self.max.y),
            ("z", self.min.z, self.max.z),
        ] {
            require_finite("bounds", min)?;
            require_finite("bounds", max)?;
            if min > max {
                return Err(PlatformError::InvalidBounds { axis, min, max });
            }
        }
        Ok(())
    }

    /// Grid points in order, `x` varying fastest, then `y`, then `z`.
    #[must_use]
    pub fn grid(&self, step: f64) -> Vec<Point3<f64>> {
        let [nx, ny, nz] = self.axis_counts(step);
        let mut points = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    points.push(Point3::new(
                        self.min.x + i as f64 * step,
                        self.min.y + j as f64 * step,
                        self.min.z + k as f64 * step,
                    ));
                }
            }
        }
        points
    }
}

/// Parameters for a workspace sweep.
///
/// # Example
///
/// ```
/// use platform_kinematics::WorkspaceParams;
///
/// let params = WorkspaceParams::default().with_step(20.0);
/// assert_eq!(params.point_count(), 9 * 9 * 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkspaceParams {
    /// Sampling box.
    pub bounds: GridBounds,

    /// Grid spacing in millimetres.
    pub step: f64,

    /// Largest grid the sampler will evaluate.
    pub max_points: usize,

    /// Also require collision-free legs for a point to be reachable.
    pub require_collision_free: bool,

    /// Evaluate grid points on the rayon thread pool.
    pub parallel: bool,
}

impl Default for WorkspaceParams {
    fn default() -> Self {
        Self {
            bounds: GridBounds::default(),
            step: 10.0,
            max_points: 250_000,
            require_collision_free: false,
            parallel: true,
        }
    }
}

impl WorkspaceParams {
    /// Sets the sampling box.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the grid step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the point budget.
    #[must_use]
    pub const fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Enables the collision requirement.
    #[must_use]
    pub const fn with_collision_free(mut self, required: bool) -> Self {
        self.require_collision_free = required;
        self
    }

    /// Chooses parallel or sequential evaluation.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of grid points these parameters produce.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.bounds.point_count(self.step)
    }

    /// Checks step, bounds and point budget.
    ///
    /// # Errors
    ///
    /// Returns a parameter error for a bad step or bounds, or
    /// [`PlatformError::GridTooLarge`] when the grid exceeds `max_points`.
    pub fn validate(&self) -> PlatformResult<()> {
        require_positive("step", self.step)?;
        self.bounds.validate()?;
        let points = self.point_count();
        if points > self.max_points {
            return Err(PlatformError::GridTooLarge {
                points,
                limit: self.max_points,
            });
        }
        Ok(())
    }
}

/// Distance class of a reachable point, nearest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceBand {
    /// First fifth of the reach.
    Nearest,
    /// Second fifth.
    Near,
    /// Third fifth.
    Middle,
    /// Fourth fifth.
    Far,
    /// Outermost fifth.
    Farthest,
}

impl DistanceBand {
    /// All bands, nearest first.
    pub const ALL: [Self; 5] = [Self::Nearest, Self::Near, Self::Middle, Self::Far, Self::Farthest];

    /// Band for `distance` given the farthest reachable distance.
    ///
    /// `floor(5 · distance / max_distance)`, clamped to the last band.
    #[must_use]
    pub fn classify(distance: f64, max_distance: f64) -> Self {
        if max_distance <= 0.0 {
            return Self::Nearest;
        }
        let index = (5.0 * distance / max_distance).floor().clamp(0.0, 4.0) as usize;
        Self::ALL[index]
    }

    /// Position of the band, 0 for nearest.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One sampled translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkspacePoint {
    /// Platform translation.
    pub position: Point3<f64>,
    /// Whether the pose at this translation is feasible.
    pub reachable: bool,
    /// Distance from the reference translation.
    pub distance: f64,
    /// Colour class, present only for reachable points.
    pub band: Option<DistanceBand>,
}

/// Result of a workspace sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceEnvelope {
    reference: Point3<f64>,
    orientation: Orientation,
    points: Vec<WorkspacePoint>,
}

impl WorkspaceEnvelope {
    /// Every grid point in grid order.
    #[must_use]
    pub fn points(&self) -> &[WorkspacePoint] {
        &self.points
    }

    /// Reachable points only.
    pub fn reachable(&self) -> impl Iterator<Item = &WorkspacePoint> {
        self.points.iter().filter(|p| p.reachable)
    }

    /// Number of reachable points.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.reachable().count()
    }

    /// Fraction of grid points that are reachable.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.points.is_empty() {
            0.0
        } else {
            self.reachable_count() as f64 / self.points.len() as f64
        }
    }

    /// Farthest reachable distance from the reference, 0 if nothing is reachable.
    #[must_use]
    pub fn max_reach(&self) -> f64 {
        self.reachable().map(|p| p.distance).fold(0.0, f64::max)
    }

    /// Reachable point count per band, nearest first.
    #[must_use]
    pub fn band_histogram(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for band in self.reachable().filter_map(|p| p.band) {
            counts[band.index()] += 1;
        }
        counts
    }

    /// Reference translation used for colouring.
    #[must_use]
    pub const fn reference(&self) -> Point3<f64> {
        self.reference
    }

    /// Orientation held fixed during the sweep.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Consumes the envelope, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<WorkspacePoint> {
        self.points
    }
}

#[derive(Debug, Clone)]
struct ReachabilityCache {
    key: [u64; 3],
    reachable: Vec<bool>,
}

/// Workspace sampler with per-orientation reachability cache.
///
/// # Example
///
/// ```
/// use platform_kinematics::{GridBounds, ValidationParams, WorkspaceParams, WorkspaceSampler};
/// use platform_types::{Configuration, GeometryParams, LegLimits, Point3, Pose, Topology};
///
/// let geometry = GeometryParams::default().limits(LegLimits::new(140.0, 220.0));
/// let config = Configuration::new(Topology::SixThree, &geometry).unwrap();
/// let params = WorkspaceParams::default()
///     .with_bounds(GridBounds::new(Point3::new(-40.0, -40.0, 150.0), Point3::new(40.0, 40.0, 170.0)))
///     .with_step(20.0);
///
/// let mut sampler = WorkspaceSampler::new(config, params, ValidationParams::default()).unwrap();
/// let envelope = sampler.sample(&Pose::home());
/// assert_eq!(envelope.points().len(), 5 * 5 * 2);
/// assert!(envelope.reachable_count() > 0);
///
/// // Moving the reference only recolours.
/// let moved = Pose::new(10.0, 0.0, 160.0, 0.0, 0.0, 0.0).unwrap();
/// assert_eq!(sampler.sample(&moved).reachable_count(), envelope.reachable_count());
/// ```
#[derive(Debug, Clone)]
pub struct WorkspaceSampler {
    config: Configuration,
    params: WorkspaceParams,
    validation: ValidationParams,
    grid: Vec<Point3<f64>>,
    cache: Option<ReachabilityCache>,
}

impl WorkspaceSampler {
    /// Creates a sampler and lays out its grid.
    ///
    /// Spacing is not rechecked per point: the attachment layout is rigid.
    ///
    /// # Errors
    ///
    /// Returns a parameter error for invalid workspace or validation
    /// parameters, or [`PlatformError::GridTooLarge`].
    pub fn new(
        config: Configuration,
        params: WorkspaceParams,
        validation: ValidationParams,
    ) -> PlatformResult<Self> {
        params.validate()?;
        validation.validate()?;

        let validation = ValidationParams {
            check_lengths: true,
            check_angles: true,
            check_spacing: false,
            check_collisions: params.require_collision_free,
            ..validation
        };
        let grid = params.bounds.grid(params.step);

        Ok(Self {
            config,
            params,
            validation,
            grid,
            cache: None,
        })
    }

    /// The configuration being sampled.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// The sweep parameters.
    #[must_use]
    pub const fn params(&self) -> &WorkspaceParams {
        &self.params
    }

    /// Number of grid points per sweep.
    #[must_use]
    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if reachability for `orientation` is cached.
    #[must_use]
    pub fn is_cached_for(&self, orientation: &Orientation) -> bool {
        self.cache.as_ref().is_some_and(|c| c.key == orientation.key())
    }

    /// Drops cached reachability.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Samples the workspace around `reference`.
    ///
    /// The grid is re-solved only when the orientation differs from the
    /// cached sweep; otherwise the cached reachability is recoloured.
    pub fn sample(&mut self, reference: &Pose) -> WorkspaceEnvelope {
        let orientation = *reference.orientation();
        let key = orientation.key();

        let reachable = match self.cache.take() {
            Some(cache) if cache.key == key => {
                debug!(points = self.grid.len(), "Workspace cache hit, recolouring");
                cache.reachable
            }
            _ => self.sweep(&orientation),
        };

        let envelope = self.color(reference, &reachable);
        self.cache = Some(ReachabilityCache { key, reachable });
        envelope
    }

    /// Recolours the cached sweep for a new reference translation.
    ///
    /// Returns `None` if nothing is cached for the reference's orientation.
    #[must_use]
    pub fn recolor(&self, reference: &Pose) -> Option<WorkspaceEnvelope> {
        let cache = self.cache.as_ref()?;
        (cache.key == reference.orientation().key())
            .then(|| self.color(reference, &cache.reachable))
    }

    fn sweep(&self, orientation: &Orientation) -> Vec<bool> {
        info!(
            topology = %self.config.topology(),
            points = self.grid.len(),
            step = self.params.step,
            parallel = self.params.parallel,
            "Starting workspace sweep"
        );

        let base = PoseTransform::new(orientation, Vector3::zeros());
        let evaluate = |position: &Point3<f64>| {
            let transform = base.with_translation(position.coords);
            let solution = solve_with_transform(&self.config, &transform);
            validate_solution(&self.config, &solution, &self.validation).is_valid()
        };

        // Indexed parallel collect keeps grid order.
        let reachable: Vec<bool> = if self.params.parallel {
            self.grid.par_iter().map(evaluate).collect()
        } else {
            self.grid.iter().map(evaluate).collect()
        };

        info!(
            reachable = reachable.iter().filter(|&&r| r).count(),
            points = reachable.len(),
            "Workspace sweep complete"
        );
        reachable
    }

    fn color(&self, reference: &Pose, reachable: &[bool]) -> WorkspaceEnvelope {
        let origin = Point3::from(*reference.translation());
        let distances: Vec<f64> = self.grid.iter().map(|p| (p - origin).norm()).collect();
        let max_distance = distances
            .iter()
            .zip(reachable)
            .filter(|(_, r)| **r)
            .map(|(d, _)| *d)
            .fold(0.0, f64::max);

        let points = self
            .grid
            .iter()
            .zip(reachable)
            .zip(distances)
            .map(|((&position, &reachable), distance)| WorkspacePoint {
                position,
                reachable,
                distance,
                band: reachable.then(|| DistanceBand::classify(distance, max_distance)),
            })
            .collect();

        WorkspaceEnvelope {
            reference: origin,
            orientation: *reference.orientation(),
            points,
        }
    }
}

/// Samples reachable translations around `reference` at its orientation.
///
/// # Errors
///
/// Returns a parameter error for invalid `params`, or
/// [`PlatformError::GridTooLarge`].
pub fn sample_workspace(
    config: &Configuration,
    reference: &Pose,
    params: &WorkspaceParams,
) -> PlatformResult<WorkspaceEnvelope> {
    let mut sampler =
        WorkspaceSampler::new(config.clone(), params.clone(), ValidationParams::default())?;
    Ok(sampler.sample(reference))
}
