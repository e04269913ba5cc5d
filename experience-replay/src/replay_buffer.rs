//! Fixed-capacity replay buffer with FIFO eviction.
//!
//! # Key Components
//!
//! - [`ReplayBuffer`]: ring buffer of [`Transition`](crate::Transition)s
//! - [`ReplayBufferConfig`]: capacity, random seed and shape policy
//! - [`TransitionBatch`]: transitions drawn by [`ReplayBuffer::sample`]
//!
//! # Examples
//!
//! ```rust
//! use experience_replay::{ReplayBuffer, ReplayBufferConfig, ShapePolicy};
//!
//! let config = ReplayBufferConfig::default()
//!     .max_history(1000)
//!     .seed(42)
//!     .shape_policy(ShapePolicy::FirstTransition);
//!
//! let buffer = ReplayBuffer::with_config(&config).unwrap();
//! assert_eq!(buffer.capacity(), 1000);
//! assert!(buffer.is_empty());
//! ```
mod base;
mod batch;
mod config;
pub use base::ReplayBuffer;
pub use batch::{ActionBatch, TransitionBatch};
pub use config::ReplayBufferConfig;
