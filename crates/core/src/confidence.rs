//! Signal-strength to confidence mapping.

/// Strategy for deriving an identification confidence from a beacon reading.
///
/// The resolution orchestrator is generic over this trait, so the scoring
/// policy can be swapped without touching the orchestration contract.
pub trait ConfidenceModel {
    /// Map a signal strength (dBm) to a confidence score in `[0.0, 1.0]`.
    ///
    /// Deterministic, no failure mode.
    fn score(&self, rssi: i32) -> f32;
}

/// Linear RSSI normalization: `clamp((rssi + 100) / 100, 0.0, 1.0)`.
///
/// A stronger signal (closer to 0 dBm) yields higher confidence:
/// -100 maps to 0.0, -50 to 0.5, 0 to 1.0. This is a deliberately simple
/// placeholder policy; a production model could fold in distance estimation
/// or signal quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearRssi;

impl ConfidenceModel for LinearRssi {
    fn score(&self, rssi: i32) -> f32 {
        #[allow(clippy::cast_precision_loss)] // rssi is range-checked to [-100, 0]
        let normalized = (rssi + 100) as f32 / 100.0;
        normalized.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_endpoints() {
        let model = LinearRssi;
        assert!((model.score(-100) - 0.0).abs() < f32::EPSILON);
        assert!((model.score(-50) - 0.5).abs() < f32::EPSILON);
        assert!((model.score(0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_score_known_values() {
        let model = LinearRssi;
        assert!((model.score(-20) - 0.8).abs() < f32::EPSILON);
        assert!((model.score(-85) - 0.15).abs() < f32::EPSILON);
    }

    #[test]
    fn test_score_monotonic_non_decreasing() {
        let model = LinearRssi;
        let mut previous = model.score(-100);
        for rssi in -99..=0 {
            let current = model.score(rssi);
            assert!(
                current >= previous,
                "score({rssi}) = {current} dropped below {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_score_clamped_outside_valid_range() {
        // Validators reject these, but the mapping itself stays bounded
        let model = LinearRssi;
        assert!((model.score(-150) - 0.0).abs() < f32::EPSILON);
        assert!((model.score(50) - 1.0).abs() < f32::EPSILON);
    }
}
