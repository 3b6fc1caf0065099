//! Bracketing and interpolation along the (pressure, temperature) axes.
//!
//! Queries outside an axis are clamped to the boundary sample, never
//! extrapolated. Clamping is reported back to the caller.

use serde::Serialize;

/// Which end of an axis a query was clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    Below,
    Above,
}

/// Axes on which a query fell outside the sampled range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClampReport {
    pub pressure: Option<Boundary>,
    pub temperature: Option<Boundary>,
}

impl ClampReport {
    pub fn is_clamped(&self) -> bool {
        self.pressure.is_some() || self.temperature.is_some()
    }
}

/// The two samples enclosing a coordinate and the weight of the upper one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: usize,
    pub upper: usize,
    pub weight: f64,
    pub clamped: Option<Boundary>,
}

impl Bracket {
    fn exact(index: usize, clamped: Option<Boundary>) -> Self {
        Self {
            lower: index,
            upper: index,
            weight: 0.0,
            clamped,
        }
    }

    /// True when no blending is needed: the lower sample is the answer.
    pub fn is_direct(&self) -> bool {
        self.lower == self.upper || self.weight == 0.0
    }
}

/// Locate `x` on a strictly increasing, non-empty axis.
///
/// NaN is treated as below the axis.
pub fn bracket(axis: &[f64], x: f64) -> Bracket {
    debug_assert!(!axis.is_empty(), "bracket on empty axis");
    let last = axis.len() - 1;

    if x.is_nan() || x <= axis[0] {
        let clamped = (x != axis[0]).then_some(Boundary::Below);
        return Bracket::exact(0, clamped);
    }
    if x >= axis[last] {
        let clamped = (x > axis[last]).then_some(Boundary::Above);
        return Bracket::exact(last, clamped);
    }

    // axis[0] <= x < axis[last], so 1 <= upper <= last
    let upper = axis.partition_point(|v| *v <= x);
    let lower = upper - 1;
    let weight = (x - axis[lower]) / (axis[upper] - axis[lower]);

    Bracket {
        lower,
        upper,
        weight,
        clamped: None,
    }
}

/// Linear blend; exact when `a == b` or `w == 0`.
pub fn lerp(a: f64, b: f64, w: f64) -> f64 {
    a + (b - a) * w
}

/// Exponential-in-1/T blend between values at `t_min` and `t_max`.
///
/// Falls back to [`lerp`] when either value is not strictly positive.
pub fn exp_interp(a: f64, b: f64, t: f64, t_min: f64, t_max: f64) -> f64 {
    if a <= 0.0 || b <= 0.0 {
        return lerp(a, b, (t - t_min) / (t_max - t_min));
    }
    a * (t_max * (t - t_min) / (t * (t_max - t_min)) * (b / a).ln()).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_interior() {
        let b = bracket(&[1.0, 2.0, 4.0], 3.0);
        assert_eq!((b.lower, b.upper), (1, 2));
        assert!((b.weight - 0.5).abs() < 1e-15);
        assert_eq!(b.clamped, None);
    }

    #[test]
    fn test_bracket_exact_sample_is_direct() {
        let b = bracket(&[1.0, 2.0, 4.0], 2.0);
        assert_eq!(b.lower, 1);
        assert!(b.is_direct());
        assert_eq!(b.clamped, None);
    }

    #[test]
    fn test_bracket_clamps() {
        let below = bracket(&[1.0, 2.0], 0.5);
        assert_eq!(below, Bracket::exact(0, Some(Boundary::Below)));

        let above = bracket(&[1.0, 2.0], 9.0);
        assert_eq!(above, Bracket::exact(1, Some(Boundary::Above)));

        let at_max = bracket(&[1.0, 2.0], 2.0);
        assert_eq!(at_max, Bracket::exact(1, None));
    }

    #[test]
    fn test_bracket_single_point_axis() {
        assert_eq!(bracket(&[5.0], 5.0), Bracket::exact(0, None));
        assert_eq!(bracket(&[5.0], 1.0), Bracket::exact(0, Some(Boundary::Below)));
        assert_eq!(bracket(&[5.0], 9.0), Bracket::exact(0, Some(Boundary::Above)));
    }

    #[test]
    fn test_bracket_nan_clamps_below() {
        let b = bracket(&[1.0, 2.0], f64::NAN);
        assert_eq!(b, Bracket::exact(0, Some(Boundary::Below)));
    }

    #[test]
    fn test_lerp_exact_for_equal_values() {
        let v = 1.234_567e-25;
        assert_eq!(lerp(v, v, 0.090_909), v);
    }

    #[test]
    fn test_exp_interp_endpoints() {
        let a = 2.0;
        let b = 8.0;
        assert!((exp_interp(a, b, 300.0, 300.0, 600.0) - a).abs() < 1e-12);
        assert!((exp_interp(a, b, 600.0, 300.0, 600.0) - b).abs() < 1e-12);
        let mid = exp_interp(a, b, 400.0, 300.0, 600.0);
        assert!(mid > a && mid < b);
    }

    #[test]
    fn test_exp_interp_falls_back_for_zero() {
        assert!((exp_interp(0.0, 4.0, 450.0, 300.0, 600.0) - 2.0).abs() < 1e-12);
    }
}
