// extensions/easing.rs
//
// Per-tick damped easing. Pure math, no dependencies on Entity/Scene.

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` a fraction `k` of the remaining distance toward `target`.
///
/// Repeated application converges asymptotically and never overshoots for
/// `k` in (0, 1].
#[inline]
pub fn damp(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Value reached after `n` applications of `damp` starting from `start`.
#[inline]
pub fn damped_after(start: f32, target: f32, k: f32, n: u32) -> f32 {
    target + (start - target) * (1.0 - k).powi(n as i32)
}
