//! Replay buffer shared between threads.
use crate::{error::ReplayBufferError, ReplayBuffer, Transition, TransitionBatch};
use std::sync::{Arc, Mutex, MutexGuard};

/// A [`ReplayBuffer`] behind a mutex.
///
/// Cloning gives another handle to the same buffer, so environment workers can
/// append while a learner samples. Each call holds the lock only while it runs.
#[derive(Clone)]
pub struct SharedReplayBuffer {
    inner: Arc<Mutex<ReplayBuffer>>,
}

impl SharedReplayBuffer {
    /// Wraps a buffer.
    pub fn new(buffer: ReplayBuffer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ReplayBuffer>, ReplayBufferError> {
        self.inner.lock().map_err(|_| ReplayBufferError::Poisoned)
    }

    /// See [`ReplayBuffer::push`].
    pub fn push(&self, tr: Transition) -> Result<(), ReplayBufferError> {
        self.lock()?.push(tr)
    }

    /// See [`ReplayBuffer::sample`].
    pub fn sample(&self, batch_size: usize) -> Result<TransitionBatch, ReplayBufferError> {
        self.lock()?.sample(batch_size)
    }

    /// See [`ReplayBuffer::len`].
    pub fn len(&self) -> Result<usize, ReplayBufferError> {
        Ok(self.lock()?.len())
    }

    /// See [`ReplayBuffer::is_full`].
    pub fn is_full(&self) -> Result<bool, ReplayBufferError> {
        Ok(self.lock()?.is_full())
    }

    /// Runs `f` with exclusive access to the buffer.
    pub fn with<T>(&self, f: impl FnOnce(&mut ReplayBuffer) -> T) -> Result<T, ReplayBufferError> {
        Ok(f(&mut *self.lock()?))
    }
}
