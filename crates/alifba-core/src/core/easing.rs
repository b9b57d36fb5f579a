// core/easing.rs
//
// Easing curves for the door and card transitions.
// Pure math, no knowledge of doors or the DOM.

/// Easing curve applied to a normalized time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    SineInOut,
    /// Overshoot then settle.
    BackOut,
}

impl Easing {
    /// Map `t` in [0, 1] through the curve. BackOut may briefly exceed 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::SineInOut, Easing::BackOut] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn back_out_overshoots() {
        assert!(Easing::BackOut.apply(0.6) > 1.0);
    }

    #[test]
    fn ease_interpolates() {
        assert!((ease(1.0, 1.2, 0.5, Easing::Linear) - 1.1).abs() < 1e-6);
        assert!(ease(0.0, 1.0, 0.5, Easing::QuadOut) > 0.5);
    }
}
