//! Drift velocity fields
//!
//! # Mathematical Background
//!
//! The analytic solution for creeping (Stokes) flow past a stationary sphere
//! of radius `a`, written in spherical coordinates `(ρ, θ)` with `θ` measured
//! from the axis, is
//!
//! ```text
//! u_ρ =  U cosθ (1 - 3a/(2ρ) + a³/(2ρ³))
//! u_θ = -U sinθ (1 - 3a/(4ρ) - a³/(4ρ³))
//! ```
//!
//! Projecting onto cylindrical components `(v_r, v_z)` with `cosθ = z/ρ`,
//! `sinθ = r/ρ` and taking the far-field speed `U = -1` (unit flow directed
//! downward, see the module docs of [`crate::physics`]) gives the closed form
//! implemented by [`StokesFlow::velocity`]:
//!
//! ```text
//! v_r = -(3 a r z)/(4 ρ³) · (a²/ρ² - 1)
//! v_z = -(1 - 3a/(4ρ) · (1 + z²/ρ²) + a³/(4ρ³) · (2 - 3r²/ρ²))
//! ```
//!
//! Two limits pin the signs down:
//!
//! - far from the sphere (`ρ → ∞`) the velocity tends to `(0, -1)`;
//! - on the sphere surface (`ρ = a`) both components vanish (no-slip).
//!
//! # Singularity
//!
//! The field is singular at the sphere centre `r = z = 0`. Callers never
//! evaluate it there: valid particles live strictly outside the sphere, and
//! the stepper freezes a particle the moment it crosses the surface.

use nalgebra::Vector2;

// =================================================================================================
// Drift Field Trait
// =================================================================================================

/// Trait for drift velocity fields
///
/// # Responsibility
///
/// Evaluates the deterministic part of the particle dynamics at a point.
/// Does NOT advance particles (that's the stepper's job).
///
/// # Contract
///
/// `velocity` must be a pure function of position: no interior mutability, no
/// dependence on evaluation order. The stepper relies on this when it replays
/// an ensemble from a seed.
pub trait DriftField: Send + Sync {
    /// Drift velocity at cylindrical position `(r, z)`, as `(v_r, v_z)`.
    fn velocity(&self, r: f64, z: f64) -> Vector2<f64>;

    /// Name of the field (used in report metadata)
    fn name(&self) -> &str;
}

// =================================================================================================
// Stokes Flow Past a Sphere
// =================================================================================================

/// Axisymmetric Stokes flow past a stationary sphere
///
/// Unit far-field speed directed along `-z`; sphere of radius `a` centred at
/// the origin. See the module docs for the closed form and its derivation.
#[derive(Debug, Clone, Copy)]
pub struct StokesFlow {
    sphere_radius: f64,
}

impl StokesFlow {
    /// Create the flow field around a sphere of radius `a`.
    ///
    /// # Errors
    ///
    /// The radius must satisfy `0 < a < 1` (lengths are measured in units of
    /// the outer length scale).
    pub fn new(sphere_radius: f64) -> Result<Self, String> {
        if !(sphere_radius > 0.0 && sphere_radius < 1.0) {
            return Err(format!(
                "Sphere radius must lie in (0, 1), got {}",
                sphere_radius
            ));
        }
        Ok(Self { sphere_radius })
    }

    /// Sphere radius `a`.
    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }

    /// Magnitude of the axial velocity component at `(r, z)`.
    ///
    /// This is the flux weight used when integrating the hitting probability
    /// over the release disk: the volumetric flux through an annulus of the
    /// release plane is `2π r dr |v_z|`.
    pub fn axial_speed(&self, r: f64, z: f64) -> f64 {
        self.velocity(r, z).y.abs()
    }
}

impl DriftField for StokesFlow {
    fn velocity(&self, r: f64, z: f64) -> Vector2<f64> {
        let a = self.sphere_radius;
        let rho2 = r * r + z * z;
        let rho = rho2.sqrt();
        let rho3 = rho2 * rho;

        let v_r = -(3.0 * a * r * z) / (4.0 * rho3) * (a * a / rho2 - 1.0);
        let v_z = -(1.0 - 3.0 * a / (4.0 * rho) * (1.0 + z * z / rho2)
            + a.powi(3) / (4.0 * rho3) * (2.0 - 3.0 * r * r / rho2));

        Vector2::new(v_r, v_z)
    }

    fn name(&self) -> &str {
        "Stokes flow past a sphere"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
