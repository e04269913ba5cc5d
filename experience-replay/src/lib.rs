#![warn(missing_docs)]
//! A bounded experience replay buffer for reinforcement learning.
//!
//! [`ReplayBuffer`] stores transitions `(o_t, a_t, r_t, o_t+1)` in a fixed-size
//! ring. When full, the oldest transition is overwritten. Batches are drawn
//! uniformly at random without replacement and never modify the stored data.
//!
//! ```
//! use experience_replay::{Action, ReplayBuffer};
//! use ndarray::{arr1, ArrayD};
//!
//! # fn main() -> Result<(), experience_replay::ReplayBufferError> {
//! let mut buffer = ReplayBuffer::new(3)?;
//! for i in 0..4 {
//!     let obs: ArrayD<f32> = arr1(&[i as f32, 0.0]).into_dyn();
//!     let next_obs: ArrayD<f32> = arr1(&[i as f32 + 1.0, 0.0]).into_dyn();
//!     buffer.append(obs, Action::Discrete(i), 1.0, next_obs)?;
//! }
//! assert!(buffer.is_full());
//!
//! let batch = buffer.sample(2)?;
//! assert_eq!(batch.len(), 2);
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod replay_buffer;

mod base;
pub use base::{ExperienceBufferBase, ReplayBufferBase};

mod shape;
pub use shape::{ActionShape, ShapePolicy, TransitionShape};

mod transition;
pub use transition::{Action, Transition};

mod shared;
pub use shared::SharedReplayBuffer;

pub use error::ReplayBufferError;
pub use replay_buffer::{ActionBatch, ReplayBuffer, ReplayBufferConfig, TransitionBatch};
