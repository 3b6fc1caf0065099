//! Shared test utilities for the opacity workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Temporary opacity trees laid out like a petitRADTRANS installation
//! - Spectrum generators with easily checked values
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, OpacityFixture};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Relative equality, for cross sections spanning many decades.
///
/// ```ignore
/// use test_utils::assert_rel_eq;
///
/// assert_rel_eq!(1.0e-25, 1.000_000_1e-25, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_rel_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let tolerance: f64 = $tolerance as f64;
        let scale = left.abs().max(right.abs());
        let diff = (left - right).abs();
        if diff > tolerance * scale {
            panic!(
                "assertion failed: `(left ≈ right)` (relative)\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > {:?} * {:?}",
                left, right, diff, tolerance, scale
            );
        }
    }};
}

/// Element-wise relative equality of two slices.
///
/// ```ignore
/// use test_utils::assert_slice_rel_eq;
///
/// assert_slice_rel_eq!(&[1.0, 2.0], &[1.0, 2.0000001], 1e-6);
/// ```
#[macro_export]
macro_rules! assert_slice_rel_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: &[f64] = &$left[..];
        let right: &[f64] = &$right[..];
        assert_eq!(
            left.len(),
            right.len(),
            "slice lengths differ: {} vs {}",
            left.len(),
            right.len()
        );
        for (l, r) in left.iter().zip(right.iter()) {
            $crate::assert_rel_eq!(*l, *r, $tolerance);
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_rel_eq_small_magnitudes() {
        assert_rel_eq!(1.0e-25, 1.000_000_1e-25, 1e-6);
        assert_rel_eq!(0.0, 0.0, 1e-12);
    }

    #[test]
    #[should_panic(expected = "relative")]
    fn test_assert_rel_eq_fails() {
        assert_rel_eq!(1.0e-25, 2.0e-25, 1e-6);
    }

    #[test]
    fn test_assert_slice_rel_eq() {
        assert_slice_rel_eq!(vec![1.0, 2.0], [1.0, 2.000_000_1], 1e-6);
    }
}
