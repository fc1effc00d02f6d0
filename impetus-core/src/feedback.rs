//! Haptic and icon feedback tables

/// Alternating on/off vibration segments in milliseconds, starting with "on"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VibePattern {
    segments: &'static [u32],
}

/// Start of a work interval: nine 100 ms on/off segments (five buzzes)
pub const WORK_PATTERN: VibePattern = VibePattern::new(&[100; 9]);

/// Start of a rest interval: two 400 ms buzzes with a 200 ms gap
pub const REST_PATTERN: VibePattern = VibePattern::new(&[400, 200, 400]);

/// End of the workout: three 600 ms buzzes with 300 ms gaps
pub const FINISHED_PATTERN: VibePattern = VibePattern::new(&[600, 300, 600, 300, 600]);

impl VibePattern {
    pub const fn new(segments: &'static [u32]) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &'static [u32] {
        self.segments
    }

    /// Iterate `(on, duration_ms)` pairs
    pub fn steps(&self) -> impl Iterator<Item = (bool, u32)> + 'static {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, &ms)| (i % 2 == 0, ms))
    }

    /// Number of motor pulses
    pub fn pulse_count(&self) -> usize {
        self.segments.len().div_ceil(2)
    }

    /// Time from first pulse to motor off
    pub fn duration_ms(&self) -> u32 {
        self.segments.iter().sum()
    }
}

/// Icon on the up-button slot of the action bar
///
/// Shows what the phone would do next: play while idle, pause while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionIcon {
    #[default]
    Play,
    Pause,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_pattern() {
        assert_eq!(WORK_PATTERN.segments(), &[100; 9]);
        assert_eq!(WORK_PATTERN.pulse_count(), 5);
        assert_eq!(WORK_PATTERN.duration_ms(), 900);
    }

    #[test]
    fn test_rest_and_finished_patterns() {
        assert_eq!(REST_PATTERN.pulse_count(), 2);
        assert_eq!(REST_PATTERN.duration_ms(), 1000);

        assert_eq!(FINISHED_PATTERN.pulse_count(), 3);
        assert_eq!(FINISHED_PATTERN.duration_ms(), 2400);
    }

    #[test]
    fn test_steps_alternate_starting_on() {
        let mut steps = REST_PATTERN.steps();
        assert_eq!(steps.next(), Some((true, 400)));
        assert_eq!(steps.next(), Some((false, 200)));
        assert_eq!(steps.next(), Some((true, 400)));
        assert_eq!(steps.next(), None);
    }
}
