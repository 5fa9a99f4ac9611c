//! Scalar interpolation and range mapping helpers
//!
//! Generic over [`num_traits::Float`] so the same helpers serve the `f64`
//! simulation code and `f32` pixel math.

use num_traits::Float;

/// Linear interpolation between `a` and `b`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Clamps `value` into `[low, high]`
pub fn constrain<T: Float>(value: T, low: T, high: T) -> T {
    value.max(low).min(high)
}

/// Re-maps `value` from one range onto another without clamping
///
/// A degenerate input range maps everything onto `out_min`.
pub fn map_range<T: Float>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    let span = in_max - in_min;
    if span == T::zero() {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Hermite step between two edges
///
/// Follows the shader definition, so the edges may be given in descending
/// order to produce a falling step. Equal edges act as a hard step.
pub fn smoothstep<T: Float>(edge0: T, edge1: T, x: T) -> T {
    let span = edge1 - edge0;
    if span == T::zero() {
        return if x < edge0 { T::zero() } else { T::one() };
    }
    let t = constrain((x - edge0) / span, T::zero(), T::one());
    let three = T::one() + T::one() + T::one();
    let two = T::one() + T::one();
    t * t * (three - two * t)
}

/// Fractional part, always in `[0, 1)`
pub fn fract<T: Float>(x: T) -> T {
    x - x.floor()
}

/// Quintic fade curve used by gradient noise
pub fn fade<T: Float>(t: T) -> T {
    let six = T::from(6.0).unwrap_or_else(T::one);
    let fifteen = T::from(15.0).unwrap_or_else(T::one);
    let ten = T::from(10.0).unwrap_or_else(T::one);
    t * t * t * (t * (t * six - fifteen) + ten)
}
