//! Collision detection and elastic resolution
//!
//! Detection is a full O(n^2) scan for approximately coincident positions,
//! with no spatial index; fine for the handful of bodies this simulator is
//! meant for.
//!
//! Resolution treats each axis as an independent 1-D elastic collision:
//!
//! ```text
//! m_a v_a' + m_b v_b' = m_a v_a + m_b v_b    (momentum)
//!         v_b' - v_a' = v_a - v_b            (relative velocity reverses)
//! ```
//!
//! This is exact for axis-aligned impacts and an approximation otherwise.
//! Masses are never merged and positions are left alone.

use log::warn;

use crate::error::{Error, Result};
use crate::simulation::states::{Body, BodyId, NVec3};
use crate::simulation::vector::approx_equal;

/// Unordered pair of colliding bodies, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub a: BodyId,
    pub b: BodyId,
}

impl CollisionPair {
    /// Normalises the order so `(i, j)` and `(j, i)` are the same pair
    pub fn new(i: BodyId, j: BodyId) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

/// All pairs `(i, j)`, `i < j`, whose positions are approximately equal
pub fn detect_collisions(bodies: &[Body]) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();
    for (i, bi) in bodies.iter().enumerate() {
        for (j, bj) in bodies.iter().enumerate().skip(i + 1) {
            if approx_equal(&bi.position(), &bj.position()) {
                pairs.push(CollisionPair::new(BodyId(i), BodyId(j)));
            }
        }
    }
    pairs
}

/// Solve the 2x2 system for one axis by Cramer's rule.
///
/// ```text
/// | m_a  m_b | |v_a'|   | m_a v_a + m_b v_b |
/// | -1    1  | |v_b'| = |     v_a - v_b     |
/// ```
/// The determinant is `m_a + m_b`, positive for valid bodies
pub fn elastic_axis(m_a: f64, v_a: f64, m_b: f64, v_b: f64) -> (f64, f64) {
    let p = m_a * v_a + m_b * v_b;
    let rel = v_a - v_b;
    let det = m_a + m_b;

    let va_new = (p - m_b * rel) / det;
    let vb_new = (m_a * rel + p) / det;
    (va_new, vb_new)
}

/// Post-collision velocities, each axis solved independently
pub fn elastic_velocities(m_a: f64, v_a: NVec3, m_b: f64, v_b: NVec3) -> (NVec3, NVec3) {
    let mut va_new = NVec3::zeros();
    let mut vb_new = NVec3::zeros();
    for k in 0..3 {
        let (a, b) = elastic_axis(m_a, v_a[k], m_b, v_b[k]);
        va_new[k] = a;
        vb_new[k] = b;
    }
    (va_new, vb_new)
}

/// Replace the velocities of `pair` in `bodies` with their elastic outcome
pub fn resolve_pair(bodies: &mut [Body], pair: CollisionPair) -> Result<()> {
    let (i, j) = (pair.a.0, pair.b.0);
    if bodies.len() < 2 {
        return Err(Error::InvalidConfiguration(
            "resolving a collision needs at least two bodies".into(),
        ));
    }
    if i == j || j >= bodies.len() {
        return Err(Error::InvalidConfiguration(format!(
            "invalid collision pair ({}, {}) for {} bodies",
            pair.a,
            pair.b,
            bodies.len()
        )));
    }

    let (va, vb) = elastic_velocities(
        bodies[i].mass(),
        bodies[i].velocity,
        bodies[j].mass(),
        bodies[j].velocity,
    );
    bodies[i].velocity = va;
    bodies[j].velocity = vb;
    Ok(())
}

/// Resolve every pending pair in order, then clear the list
pub fn resolve_collisions(bodies: &mut [Body], pending: &mut Vec<CollisionPair>) -> Result<()> {
    for pair in pending.iter() {
        warn!("collision detected between bodies {} and {}", pair.a, pair.b);
        resolve_pair(bodies, *pair)?;
    }
    pending.clear();
    Ok(())
}
