#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    Power3In,
    Power3Out,
    Power4Out,
    /// Exponential ease-out used by the smooth scroll controller.
    ExpoScroll,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::Power2In => t.powi(3),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3In => t.powi(4),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power4Out => 1.0 - (1.0 - t).powi(5),
            Self::ExpoScroll => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power3In,
        Ease::Power3Out,
        Ease::Power4Out,
        Ease::ExpoScroll,
    ];

    #[test]
    fn curves_end_at_one() {
        for ease in ALL {
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?}");
        }
    }

    #[test]
    fn polynomial_curves_start_at_zero() {
        for ease in ALL.into_iter().filter(|e| *e != Ease::ExpoScroll) {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        }
    }

    #[test]
    fn scroll_curve_starts_slightly_above_zero_and_saturates() {
        let start = Ease::ExpoScroll.apply(0.0);
        assert!((start - 0.001).abs() < 1e-12);
        assert_eq!(Ease::ExpoScroll.apply(0.999), 1.0);
        assert!(Ease::ExpoScroll.apply(0.5) > 0.96);
    }

    #[test]
    fn out_curves_lead_and_in_curves_lag_linear() {
        assert!(Ease::Power3Out.apply(0.3) > 0.3);
        assert!(Ease::Power3In.apply(0.3) < 0.3);
        assert!(Ease::Power4Out.apply(0.3) > Ease::Power2Out.apply(0.3));
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(Ease::Power2Out.apply(-2.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(4.0), 1.0);
        assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
    }
}
