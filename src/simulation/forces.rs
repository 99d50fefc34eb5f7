//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the set that sums contributors, and
//! direct-sum Newtonian gravity with a minimum-separation floor

use log::trace;

use crate::error::{Error, Result};
use crate::simulation::states::{Body, NVec3};
use crate::simulation::vector::fmt_vec;

/// Collection of acceleration terms (gravity, drag, etc)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - fails with `NumericSingularity` if any result is not finite
    pub fn accumulate_accels(&self, t: f64, bodies: &[Body], out: &mut [NVec3]) -> Result<()> {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, bodies, out);
        }

        for (b, a) in bodies.iter().zip(out.iter()) {
            if !a.iter().all(|c| c.is_finite()) {
                return Err(Error::NumericSingularity(format!(
                    "non-finite acceleration {} on body {} at t={t}",
                    fmt_vec(a),
                    b.id
                )));
            }
        }
        Ok(())
    }
}

/// Trait for acceleration sources operating on a body slice.
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, bodies: &[Body], out: &mut [NVec3]);
}

/// Newtonian gravity, direct O(n^2) sum.
///
/// The distance in the inverse-square term is clamped to `min_separation`
/// so near-coincident bodies (which the collision detector has just handled)
/// get a bounded pull. Exactly coincident bodies have no defined direction
/// and contribute nothing to each other
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_separation: f64, // distance floor
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, bodies: &[Body], out: &mut [NVec3]) {
        let n = bodies.len();
        if n < 2 { // nothing to attract
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = bodies[i].position();
            let mi = bodies[i].mass();

            for j in (i + 1)..n {
                let xj = bodies[j].position();
                let mj = bodies[j].mass();

                // r points from i to j: i is pulled along +r, j along -r
                let r = xj - xi;
                let dist = r.norm();
                if dist == 0.0 {
                    trace!("bodies {} and {} coincide, skipping pair", bodies[i].id, bodies[j].id);
                    continue;
                }

                let d = dist.max(self.min_separation);

                // coef * m_other * r = G m_other / d^2 * (r / |r|)
                let coef = self.G / (d * d * dist);

                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}
