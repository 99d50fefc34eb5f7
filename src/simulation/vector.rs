//! 3D vector helpers on top of nalgebra
//!
//! `NVec3` is a plain value type; arithmetic (`+`, `-`, unary `-`, scalar
//! `*` and `/`) comes from nalgebra. This module adds the approximate
//! equality used for collision detection and a log-friendly formatter.
//!
//! The tolerance is absolute, not relative: at astronomical scales two
//! coordinates that differ by less than `EPSILON` metres compare equal even
//! though they are numerically distinct

use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

/// Absolute per-component tolerance for [`approx_equal`]
pub const EPSILON: f64 = 1.0e-3;

/// `true` when `a` and `b` differ by at most [`EPSILON`]
pub fn feq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Component-wise approximate equality
pub fn approx_equal(a: &NVec3, b: &NVec3) -> bool {
    feq(a.x, b.x) && feq(a.y, b.y) && feq(a.z, b.z)
}

/// Euclidean length sqrt(x^2 + y^2 + z^2)
pub fn magnitude(v: &NVec3) -> f64 {
    v.norm()
}

/// Render as `(x, y, z)`
pub fn fmt_vec(v: &NVec3) -> String {
    format!("({:?}, {:?}, {:?})", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feq_boundaries() {
        assert!(feq(0.0, 0.0));
        assert!(feq(1.0000001, 1.0));
        assert!(feq(10.99999999901, 11.0));
        assert!(!feq(0.0, 10.0));
        assert!(!feq(21.5, 22.0));
        assert!(!feq(23.15267, 23.15567));
        assert!(!feq(23.15267, 23.15367));
    }

    #[test]
    fn magnitude_of_pythagorean_triple() {
        assert_eq!(magnitude(&NVec3::new(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(magnitude(&NVec3::new(2.0, 3.0, 6.0)), 7.0);
    }

    #[test]
    fn fmt_vec_matches_log_format() {
        assert_eq!(fmt_vec(&NVec3::new(1.0, 2.5, -3.0)), "(1.0, 2.5, -3.0)");
    }
}
