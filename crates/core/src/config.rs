//! Engine configuration.
//!
//! Read from the environment (`BLOCKFALL_*` variables) by the binary; tests go
//! through [`EngineConfig::from_lookup`] so they never touch the process
//! environment.

use std::fmt;

use crate::types::MAX_LEVEL;

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_LOCK_MODE: &str = "BLOCKFALL_LOCK_MODE";
pub const ENV_START_LEVEL: &str = "BLOCKFALL_START_LEVEL";
pub const ENV_DEBUG: &str = "BLOCKFALL_DEBUG";

/// How a piece that comes to rest gets locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// Level-scaled grace period, cut short by holding down
    #[default]
    Countdown,
    /// Lock on the tick the piece is found resting
    Immediate,
}

impl LockMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "countdown" => Some(LockMode::Countdown),
            "immediate" => Some(LockMode::Immediate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Countdown => "countdown",
            LockMode::Immediate => "immediate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSeed,
    InvalidLockMode,
    InvalidStartLevel,
    StartLevelTooHigh,
    InvalidDebugFlag,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::InvalidSeed => "invalid_seed",
            ConfigError::InvalidLockMode => "invalid_lock_mode",
            ConfigError::InvalidStartLevel | ConfigError::StartLevelTooHigh => {
                "invalid_start_level"
            }
            ConfigError::InvalidDebugFlag => "invalid_debug_flag",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::InvalidSeed => "BLOCKFALL_SEED must be an unsigned 32-bit integer",
            ConfigError::InvalidLockMode => {
                "BLOCKFALL_LOCK_MODE must be \"countdown\" or \"immediate\""
            }
            ConfigError::InvalidStartLevel => {
                "BLOCKFALL_START_LEVEL must be a non-negative integer"
            }
            ConfigError::StartLevelTooHigh => "BLOCKFALL_START_LEVEL must not exceed 999",
            ConfigError::InvalidDebugFlag => "BLOCKFALL_DEBUG must be 0, 1, true or false",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the random piece source
    pub seed: u32,
    pub lock_mode: LockMode,
    /// Level the session starts at, at most 999
    pub start_level: u32,
    /// Enables the board-clear and level-skip buttons
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            lock_mode: LockMode::Countdown,
            start_level: 0,
            debug: false,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_lock_mode(mut self, lock_mode: LockMode) -> Self {
        self.lock_mode = lock_mode;
        self
    }

    pub fn with_start_level(mut self, start_level: u32) -> Self {
        self.start_level = start_level;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or blank values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = get(ENV_SEED) {
            config.seed = raw.parse().map_err(|_| ConfigError::InvalidSeed)?;
        }

        if let Some(raw) = get(ENV_LOCK_MODE) {
            config.lock_mode = LockMode::from_str(&raw).ok_or(ConfigError::InvalidLockMode)?;
        }

        if let Some(raw) = get(ENV_START_LEVEL) {
            let level: u32 = raw.parse().map_err(|_| ConfigError::InvalidStartLevel)?;
            if level > MAX_LEVEL {
                return Err(ConfigError::StartLevelTooHigh);
            }
            config.start_level = level;
        }

        if let Some(raw) = get(ENV_DEBUG) {
            config.debug = match raw.to_lowercase().as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => return Err(ConfigError::InvalidDebugFlag),
            };
        }

        Ok(config)
    }
}
