//! Configuration for drivers: size schedules and shrinking budgets.

use std::time::Duration;

use crate::error::ConfigError;

/// How a driver sizes successive generations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Number of values to generate
    pub iterations: usize,
    /// Size hint of the first generation
    pub initial_size: usize,
    /// Largest size hint ever handed out
    pub max_size: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            initial_size: 0,
            max_size: 100,
        }
    }
}

impl GenerationConfig {
    /// Create a new generation configuration with validation
    pub fn new(
        iterations: usize,
        initial_size: usize,
        max_size: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            iterations,
            initial_size,
            max_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the generation configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        if self.initial_size > self.max_size {
            return Err(ConfigError::InvalidSize {
                initial: self.initial_size,
                max: self.max_size,
            });
        }
        Ok(())
    }

    /// Size hints for each iteration: growing by one, capped at `max_size`
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.iterations).map(move |i| self.initial_size.saturating_add(i).min(self.max_size))
    }
}

/// Budget for one [`ShrinkEngine`](crate::ShrinkEngine) run.
///
/// A step is one move to a smaller failing value. The timeout is checked
/// before every candidate the engine evaluates, so a single large candidate
/// set cannot outlast it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkConfig {
    /// Steps taken before giving up
    pub max_steps: usize,
    /// Wall-clock limit for the whole run
    pub timeout: Duration,
    /// Log each step at `info` rather than `debug`
    pub verbose: bool,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            timeout: Duration::from_secs(10),
            verbose: false,
        }
    }
}

impl ShrinkConfig {
    /// Validated budget; both limits must be non-zero
    pub fn new(max_steps: usize, timeout: Duration, verbose: bool) -> Result<Self, ConfigError> {
        if max_steps == 0 {
            return Err(ConfigError::InvalidShrinkSteps(max_steps));
        }
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(timeout));
        }
        Ok(Self {
            max_steps,
            timeout,
            verbose,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}
