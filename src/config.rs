//! Configuration primitives for the MMA8451 driver.

use crate::params::{DataRate, Oversampling, Range};

/// Largest value accepted by the 7-bit `TRANSIENT_THS` field.
pub const MAX_TRANSIENT_THRESHOLD: u8 = 0x7F;

/// User-facing configuration applied by [`Mma8451::init`](crate::Mma8451::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate written together with the active bit.
    pub data_rate: DataRate,
    /// Reduced noise mode (`CTRL_REG1.LNOISE`).
    pub low_noise: bool,
    /// Active mode oversampling.
    pub oversampling: Oversampling,
    /// Full-scale range.
    pub range: Range,
    /// Route high-pass filtered data to the output registers.
    pub high_pass_output: bool,
    /// Transient threshold in 0.063 g steps.
    pub transient_threshold: u8,
    /// Consecutive qualifying samples (~10 ms each) before a transient latches.
    pub transient_debounce: u8,
    /// Maximum number of `CTRL_REG2` reads while waiting for soft reset.
    pub reset_poll_limit: u16,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.transient_threshold > MAX_TRANSIENT_THRESHOLD {
            return Err(ConfigError::ThresholdOutOfRange);
        }

        if self.low_noise && !self.range.supports_low_noise() {
            return Err(ConfigError::LowNoiseRange);
        }

        if self.reset_poll_limit == 0 {
            return Err(ConfigError::ZeroPollLimit);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Enables or disables reduced noise mode.
    pub fn low_noise(mut self, enable: bool) -> Self {
        self.config.low_noise = enable;
        self
    }

    /// Sets the oversampling mode.
    pub fn oversampling(mut self, mode: Oversampling) -> Self {
        self.config.oversampling = mode;
        self
    }

    /// Sets the full-scale range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Selects high-pass filtered or raw output data.
    pub fn high_pass_output(mut self, enable: bool) -> Self {
        self.config.high_pass_output = enable;
        self
    }

    /// Sets the transient threshold in 0.063 g steps.
    pub fn transient_threshold(mut self, steps: u8) -> Self {
        self.config.transient_threshold = steps;
        self
    }

    /// Sets the transient debounce count.
    pub fn transient_debounce(mut self, count: u8) -> Self {
        self.config.transient_debounce = count;
        self
    }

    /// Sets the soft reset poll limit.
    pub fn reset_poll_limit(mut self, polls: u16) -> Self {
        self.config.reset_poll_limit = polls;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_rate: DataRate::Hz800,
            low_noise: false,
            oversampling: Oversampling::HighResolution,
            range: Range::G4,
            high_pass_output: true,
            transient_threshold: 16,
            transient_debounce: 5,
            reset_poll_limit: 100,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Transient threshold does not fit the 7-bit register field.
    ThresholdOutOfRange,
    /// Low-noise mode is limited to ±4 g and below.
    LowNoiseRange,
    /// The soft reset poll needs at least one read.
    ZeroPollLimit,
}
