//! Frequency registry: hands the configured frequency list back unchanged.

use taskboard_core::Frequency;

#[derive(Debug, Clone, Default)]
pub struct FrequencyRegistry {
    frequencies: Vec<Frequency>,
}

impl FrequencyRegistry {
    pub fn new(frequencies: Vec<Frequency>) -> Self {
        Self { frequencies }
    }

    /// All frequencies, in configured order.
    pub fn all(&self) -> &[Frequency] {
        &self.frequencies
    }

    /// Find a frequency by its interval name (e.g. `"dailyAt"`).
    pub fn find(&self, interval: &str) -> Option<&Frequency> {
        self.frequencies.iter().find(|f| f.interval == interval)
    }
}
