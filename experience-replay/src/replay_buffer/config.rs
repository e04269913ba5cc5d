//! Configuration of [`ReplayBuffer`](super::ReplayBuffer).
use crate::{error::ReplayBufferError, ShapePolicy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReplayBuffer`](super::ReplayBuffer).
///
/// # Examples
///
/// ```rust
/// use experience_replay::{ActionShape, ReplayBufferConfig, ShapePolicy, TransitionShape};
///
/// let config = ReplayBufferConfig::default()
///     .max_history(50_000)
///     .seed(7)
///     .shape_policy(ShapePolicy::Fixed(TransitionShape::new(
///         [4],
///         ActionShape::Discrete,
///     )));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct ReplayBufferConfig {
    /// Maximum number of transitions kept in the buffer.
    /// When the buffer is full, new transitions replace the oldest ones.
    pub max_history: usize,

    /// Seed of the random number generator used for sampling.
    pub seed: u64,

    /// Which transition shapes the buffer accepts.
    pub shape_policy: ShapePolicy,
}

impl Default for ReplayBufferConfig {
    fn default() -> Self {
        Self {
            max_history: 10_000,
            seed: 42,
            shape_policy: ShapePolicy::FirstTransition,
        }
    }
}

impl ReplayBufferConfig {
    /// Sets the capacity of the replay buffer.
    pub fn max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the shape policy.
    pub fn shape_policy(mut self, shape_policy: ShapePolicy) -> Self {
        self.shape_policy = shape_policy;
        self
    }

    /// Checks that a buffer can be built from this configuration.
    pub fn validate(&self) -> Result<(), ReplayBufferError> {
        if self.max_history == 0 {
            return Err(ReplayBufferError::InvalidConfig(
                "max_history must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionShape, TransitionShape};
    use tempdir::TempDir;

    #[test]
    fn test_serde_replay_buffer_config() -> Result<()> {
        let config = ReplayBufferConfig::default()
            .max_history(100)
            .seed(3)
            .shape_policy(ShapePolicy::Fixed(TransitionShape::new(
                [2, 3],
                ActionShape::Continuous(vec![1]),
            )));

        let dir = TempDir::new("replay_buffer_config")?;
        let path = dir.path().join("replay_buffer_config.yaml");
        println!("{:?}", path);

        config.save(&path)?;
        let config_ = ReplayBufferConfig::load(&path)?;
        assert_eq!(config, config_);

        Ok(())
    }

    #[test]
    fn test_partial_yaml_uses_defaults() -> Result<()> {
        let config: ReplayBufferConfig = serde_yaml::from_str("max_history: 5\n")?;
        assert_eq!(config.max_history, 5);
        assert_eq!(config.seed, 42);
        assert_eq!(config.shape_policy, ShapePolicy::FirstTransition);
        Ok(())
    }

    #[test]
    fn test_negative_max_history_is_rejected() {
        let config = serde_yaml::from_str::<ReplayBufferConfig>("max_history: -1\n");
        assert!(config.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(ReplayBufferConfig::default().validate().is_ok());
        assert!(matches!(
            ReplayBufferConfig::default().max_history(0).validate(),
            Err(ReplayBufferError::InvalidConfig(_))
        ));
    }
}
