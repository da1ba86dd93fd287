//! Particle ensembles and initial conditions
//!
//! An [`Ensemble`] is a structure-of-arrays container: two `DVector`s hold
//! the radial and axial coordinates of every particle, a third remembers the
//! release radius each particle originated from, and a flag array carries the
//! terminal [`Outcome`]. The stepper advances all arrays together, one time
//! step at a time, so there is never a partially-advanced ensemble.

use nalgebra::DVector;

// =================================================================================================
// Collision Outcome
// =================================================================================================

/// Terminal classification of one trajectory
///
/// Mutually exclusive and terminal: once a particle is resolved it is frozen
/// and its flag never changes again. `Unresolved` is the initial value and
/// the value reported when the step budget runs out first — a bias source
/// that must be surfaced, never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Crossed the sphere surface (`r² + z² < a²`)
    HitSphere,
    /// Crossed the floor, outer-radius or ceiling surface
    HitBoundary,
    /// Still inside the domain (active, or budget exhausted)
    Unresolved,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HitSphere => write!(f, "hit-sphere"),
            Outcome::HitBoundary => write!(f, "hit-boundary"),
            Outcome::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Outcome tally over a whole ensemble
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub hit_sphere: usize,
    pub hit_boundary: usize,
    pub unresolved: usize,
}

impl OutcomeCounts {
    /// Total number of particles counted.
    pub fn total(&self) -> usize {
        self.hit_sphere + self.hit_boundary + self.unresolved
    }

    /// Fraction of particles left unresolved by the step budget.
    pub fn unresolved_fraction(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.unresolved as f64 / self.total() as f64
        }
    }
}

// =================================================================================================
// Release Grid (Initial Condition Generator)
// =================================================================================================

/// Regular radial release grid on a plane above the sphere
///
/// Particles start on annulus midpoints: the disk of radius
/// `disk_radius` is divided into `floor(disk_radius / radial_step)` annuli of
/// width `radial_step`, and `trials` independent particles are placed at the
/// centre radius of each annulus, all at height `z = height`. Midpoint
/// placement makes the annulus area `2π r Δr` an exact weight for linear
/// flux profiles in the direct Sherwood path.
///
/// # Example
///
/// ```rust
/// use pesh_rs::simulation::ReleaseGrid;
///
/// let grid = ReleaseGrid { disk_radius: 0.1, radial_step: 0.01, height: 5.0, trials: 50 };
/// assert!(grid.validate().is_ok());
/// assert_eq!(grid.radii().len(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReleaseGrid {
    /// Outer radius of the release disk
    pub disk_radius: f64,

    /// Radial sampling resolution (annulus width)
    pub radial_step: f64,

    /// Release height above the sphere centre
    pub height: f64,

    /// Independent particles per release radius
    pub trials: usize,
}

impl ReleaseGrid {
    /// Validate grid parameters.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.disk_radius.is_finite() && self.disk_radius > 0.0) {
            return Err(format!(
                "Release disk radius must be positive, got {}",
                self.disk_radius
            ));
        }
        if !(self.radial_step.is_finite() && self.radial_step > 0.0) {
            return Err(format!(
                "Radial step must be positive, got {}",
                self.radial_step
            ));
        }
        if self.radial_step > self.disk_radius {
            return Err(format!(
                "Radial step {} exceeds the disk radius {}",
                self.radial_step, self.disk_radius
            ));
        }
        if self.height <= 0.0 {
            return Err(format!("Release height must be positive, got {}", self.height));
        }
        if self.trials == 0 {
            return Err("Trial count must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Annulus-centre radii of the grid, innermost first.
    pub fn radii(&self) -> Vec<f64> {
        // The nudge absorbs representation error in the quotient, so a disk
        // that is a whole multiple of the step keeps its last annulus.
        let annuli = (self.disk_radius / self.radial_step + 1e-9).floor() as usize;
        (0..annuli)
            .map(|i| (i as f64 + 0.5) * self.radial_step)
            .collect()
    }
}

// =================================================================================================
// Ensemble
// =================================================================================================

/// Fixed-size collection of independent particles sharing one set of
/// simulation parameters
///
/// # Invariants
///
/// - all four arrays have the same length, fixed at construction;
/// - `r` stays non-negative (the stepper reflects axis crossings);
/// - a particle whose outcome is resolved is never moved again.
#[derive(Debug, Clone)]
pub struct Ensemble {
    pub(crate) r: DVector<f64>,
    pub(crate) z: DVector<f64>,
    pub(crate) origin: DVector<f64>,
    pub(crate) outcomes: Vec<Outcome>,
}

impl Ensemble {
    /// Release `trials` particles at a single radius.
    ///
    /// All particles start at `(radius, height)` and differ only in their
    /// noise realisations. This is the layout the hitting-probability
    /// estimator runs on.
    pub fn release_at(radius: f64, height: f64, trials: usize) -> Result<Self, String> {
        if trials == 0 {
            return Err("Cannot build an empty ensemble (trials = 0)".to_string());
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(format!("Release radius must be non-negative, got {}", radius));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(format!("Release height must be positive, got {}", height));
        }
        Ok(Self {
            r: DVector::from_element(trials, radius),
            z: DVector::from_element(trials, height),
            origin: DVector::from_element(trials, radius),
            outcomes: vec![Outcome::Unresolved; trials],
        })
    }

    /// Lay out a full release grid (annulus midpoints × trials).
    ///
    /// Particles are ordered radius-major: the `trials` copies released at
    /// the innermost radius come first. The origin array preserves the
    /// radius-of-origin association needed for per-radius grouping.
    pub fn release_grid(grid: &ReleaseGrid) -> Result<Self, String> {
        grid.validate()?;

        let radii = grid.radii();
        let n = radii.len() * grid.trials;
        let mut r = DVector::zeros(n);
        let mut origin = DVector::zeros(n);

        for (k, &radius) in radii.iter().enumerate() {
            for t in 0..grid.trials {
                let idx = k * grid.trials + t;
                r[idx] = radius;
                origin[idx] = radius;
            }
        }

        Ok(Self {
            r,
            z: DVector::from_element(n, grid.height),
            origin,
            outcomes: vec![Outcome::Unresolved; n],
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when the ensemble holds no particles.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Radial coordinates of all particles.
    pub fn radial(&self) -> &DVector<f64> {
        &self.r
    }

    /// Axial coordinates of all particles.
    pub fn axial(&self) -> &DVector<f64> {
        &self.z
    }

    /// Release radius each particle originated from.
    pub fn origins(&self) -> &DVector<f64> {
        &self.origin
    }

    /// Terminal flags of all particles.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Position of particle `i` as `(r, z)`.
    pub fn position(&self, i: usize) -> (f64, f64) {
        (self.r[i], self.z[i])
    }

    /// Number of particles not yet resolved.
    pub fn unresolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|&&o| o == Outcome::Unresolved)
            .count()
    }

    /// Tally all outcomes.
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for outcome in &self.outcomes {
            match outcome {
                Outcome::HitSphere => counts.hit_sphere += 1,
                Outcome::HitBoundary => counts.hit_boundary += 1,
                Outcome::Unresolved => counts.unresolved += 1,
            }
        }
        counts
    }
}

// =================================================================================================
// Tests
// =================================================================================================
