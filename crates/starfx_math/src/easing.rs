//! Scalar interpolation helpers

use crate::Vec2;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` a fraction `factor` of the way toward `target`
///
/// Applied once per frame this gives exponential convergence: the remaining
/// distance shrinks by `(1 - factor)` every call. `factor` is clamped to [0, 1].
#[inline]
pub fn ease_toward(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(4.0, 4.0, 0.9), 4.0);
    }

    #[test]
    fn test_ease_toward_shrinks_distance() {
        let target = Vec2::new(100.0, 50.0);
        let mut pos = Vec2::ZERO;
        let mut last = pos.distance(target);
        for _ in 0..10 {
            pos = ease_toward(pos, target, 0.15);
            let d = pos.distance(target);
            assert!(d < last);
            last = d;
        }
    }

    #[test]
    fn test_ease_toward_full_factor_snaps() {
        let target = Vec2::new(3.0, 4.0);
        assert_eq!(ease_toward(Vec2::ZERO, target, 1.0), target);
        assert_eq!(ease_toward(Vec2::ZERO, target, 7.0), target);
    }
}
