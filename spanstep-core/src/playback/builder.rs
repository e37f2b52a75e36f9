//! Builder for [`PlaybackController`] instances.

use std::{sync::Arc, time::Duration};

use crate::{
    clock::{Clock, SystemClock},
    error::PlaybackError,
    steps::AlgorithmStep,
};

use super::{
    DEFAULT_BASE_INTERVAL, DEFAULT_SPEED, MAX_INTERVAL, PlaybackController, interval_for,
};

/// Configures and constructs [`PlaybackController`] instances.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use spanstep_core::{Graph, ManualClock, PlaybackBuilder};
///
/// let run = Graph::sample().run_kruskal().expect("sample graph is valid");
/// let playback = PlaybackBuilder::new()
///     .with_base_interval(Duration::from_millis(1000))
///     .with_speed(2.0)
///     .build_with_clock(run.shared_steps(), ManualClock::new())
///     .expect("configuration is valid");
/// assert_eq!(playback.interval(), Duration::from_millis(500));
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackBuilder {
    base_interval: Duration,
    speed: f64,
}

impl Default for PlaybackBuilder {
    fn default() -> Self {
        Self {
            base_interval: DEFAULT_BASE_INTERVAL,
            speed: DEFAULT_SPEED,
        }
    }
}

impl PlaybackBuilder {
    /// Creates a builder with a two second base interval at normal speed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the autoplay interval used at speed 1.0.
    #[must_use]
    pub const fn with_base_interval(mut self, base_interval: Duration) -> Self {
        self.base_interval = base_interval;
        self
    }

    /// Overrides the initial speed multiplier.
    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Returns the configured base interval.
    #[must_use]
    #[rustfmt::skip]
    pub const fn base_interval(&self) -> Duration { self.base_interval }

    /// Returns the configured speed multiplier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn speed(&self) -> f64 { self.speed }

    /// Builds a controller driven by wall-clock time.
    ///
    /// # Errors
    /// See [`Self::build_with_clock`].
    pub fn build(
        &self,
        steps: Arc<[AlgorithmStep]>,
    ) -> Result<PlaybackController<SystemClock>, PlaybackError> {
        self.build_with_clock(steps, SystemClock)
    }

    /// Builds a controller driven by `clock`.
    ///
    /// # Errors
    /// Returns [`PlaybackError::InvalidInterval`] for a base interval that is
    /// zero or longer than [`MAX_INTERVAL`], and [`PlaybackError::InvalidSpeed`]
    /// for a speed that is not positive and finite or that stretches the
    /// interval past [`MAX_INTERVAL`].
    pub fn build_with_clock<C: Clock>(
        &self,
        steps: Arc<[AlgorithmStep]>,
        clock: C,
    ) -> Result<PlaybackController<C>, PlaybackError> {
        if self.base_interval.is_zero() || self.base_interval > MAX_INTERVAL {
            return Err(PlaybackError::InvalidInterval);
        }
        let interval = interval_for(self.base_interval, self.speed)?;
        Ok(PlaybackController::from_parts(
            steps,
            self.base_interval,
            self.speed,
            interval,
            clock,
        ))
    }
}
