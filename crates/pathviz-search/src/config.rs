use std::time::Duration;

/// Settings for one search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Allow the four diagonal moves (octile heuristic) in addition to the
    /// cardinal ones (Manhattan heuristic).
    pub diagonal: bool,
    /// Publish and pause after every expansion.
    pub animate: bool,
    /// Pause length between expansions when animating. Zero means no pause.
    #[cfg_attr(feature = "serde", serde(with = "delay_ms"))]
    pub delay: Duration,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set diagonal movement (builder).
    pub fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Set animation (builder).
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Set the inter-step delay (builder).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the inter-step delay in milliseconds (builder).
    pub fn with_delay_ms(self, ms: u64) -> Self {
        self.with_delay(Duration::from_millis(ms))
    }

    /// Whether a run pauses between expansions.
    #[inline]
    pub fn suspends(&self) -> bool {
        self.animate && !self.delay.is_zero()
    }
}

#[cfg(feature = "serde")]
mod delay_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
