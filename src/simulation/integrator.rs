//! Fixed-step time integration
//!
//! Semi-implicit Euler: the velocity is kicked first with this step's
//! acceleration, then the position drifts with the updated velocity

use super::states::{Body, NVec3};

/// Advance `bodies` by one step of `dt` using accelerations `accels`
/// (one per body, computed from the positions before this step).
///
/// Stores the acceleration on each body, then
/// - v_n+1 = v_n + dt * a_n
/// - x_n+1 = x_n + dt * v_n+1 (appended to the trajectory)
pub fn euler_integrator(bodies: &mut [Body], accels: &[NVec3], dt: f64) {
    debug_assert_eq!(bodies.len(), accels.len());

    for (b, a) in bodies.iter_mut().zip(accels.iter()) {
        b.acceleration = *a;
        b.velocity += *a * dt;
    }

    for b in bodies.iter_mut() {
        let next = b.position() + b.velocity * dt;
        b.advance_to(next);
    }
}
