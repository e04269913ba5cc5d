//! Ring buffer of transitions.
use super::{ReplayBufferConfig, TransitionBatch};
use crate::{
    error::ReplayBufferError, Action, ExperienceBufferBase, ReplayBufferBase, ShapePolicy,
    Transition, TransitionShape,
};
use anyhow::Result;
use log::{debug, info, warn};
use ndarray::ArrayD;
use rand::{rngs::StdRng, SeedableRng};

/// A fixed-capacity replay buffer.
///
/// Transitions are written into a slot arena at a cursor that wraps around
/// at `max_history`, so once the buffer is full every append overwrites the
/// oldest transition. [`ReplayBuffer::sample`] draws distinct slots uniformly
/// at random and copies them out; stored transitions are never modified.
///
/// The buffer is meant for a single training loop. Wrap it in
/// [`SharedReplayBuffer`](crate::SharedReplayBuffer) to share it between threads.
///
/// # Examples
///
/// ```
/// use experience_replay::{Action, ReplayBuffer, ReplayBufferError};
/// use ndarray::{ArrayD, IxDyn};
///
/// let mut buffer = ReplayBuffer::new(5).unwrap();
/// let obs = ArrayD::<f32>::zeros(IxDyn(&[4]));
/// buffer.append(obs.clone(), Action::Discrete(0), 1.0, obs.clone()).unwrap();
///
/// // The first transition fixed the state shape to [4].
/// let bad = ArrayD::<f32>::zeros(IxDyn(&[3]));
/// let res = buffer.append(bad.clone(), Action::Discrete(0), 1.0, bad);
/// assert!(matches!(res, Err(ReplayBufferError::ShapeMismatch { .. })));
/// assert_eq!(buffer.len(), 1);
/// ```
pub struct ReplayBuffer {
    /// Maximum number of transitions that can be stored.
    capacity: usize,

    /// Slot written by the next append.
    i: usize,

    /// Stored transitions, at most `capacity`.
    slots: Vec<Transition>,

    /// Number of successful appends since construction.
    n_pushed: u64,

    shape_policy: ShapePolicy,

    /// Shape accepted by the buffer, if already known.
    shape: Option<TransitionShape>,

    /// Random number generator for sampling.
    rng: StdRng,
}

impl ReplayBuffer {
    /// Creates an empty buffer holding at most `max_history` transitions.
    ///
    /// Other settings take the values of [`ReplayBufferConfig::default`].
    pub fn new(max_history: usize) -> Result<Self, ReplayBufferError> {
        Self::with_config(&ReplayBufferConfig::default().max_history(max_history))
    }

    /// Creates an empty buffer from the given configuration.
    pub fn with_config(config: &ReplayBufferConfig) -> Result<Self, ReplayBufferError> {
        config.validate()?;
        let capacity = config.max_history;
        let shape = match &config.shape_policy {
            ShapePolicy::Fixed(shape) => Some(shape.clone()),
            _ => None,
        };
        info!(
            "Built replay buffer: max_history = {}, seed = {}, shape_policy = {:?}",
            capacity, config.seed, config.shape_policy
        );

        Ok(Self {
            capacity,
            i: 0,
            slots: Vec::with_capacity(capacity),
            n_pushed: 0,
            shape_policy: config.shape_policy.clone(),
            shape,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Constructs a transition and appends it.
    ///
    /// See [`ReplayBuffer::push`].
    pub fn append(
        &mut self,
        current_state: ArrayD<f32>,
        action: impl Into<Action>,
        reward: f32,
        next_state: ArrayD<f32>,
    ) -> Result<(), ReplayBufferError> {
        self.push(Transition::new(current_state, action, reward, next_state))
    }

    /// Appends a transition, evicting the oldest one if the buffer is full.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayBufferError::ShapeMismatch`] if the transition does not
    /// conform to the shape policy. The buffer is left unchanged in that case.
    pub fn push(&mut self, tr: Transition) -> Result<(), ReplayBufferError> {
        if let Err(e) = self.check_shape(&tr) {
            warn!("Rejected transition: {}", e);
            return Err(e);
        }

        if self.shape.is_none() && self.shape_policy == ShapePolicy::FirstTransition {
            let shape = TransitionShape::of(&tr);
            debug!("Transition shape established: {:?}", shape);
            self.shape = Some(shape);
        }

        if self.slots.len() < self.capacity {
            self.slots.push(tr);
        } else {
            self.slots[self.i] = tr;
        }

        self.i += 1;
        if self.i == self.capacity {
            debug!(
                "Replay buffer wrapped around after {} transitions",
                self.n_pushed + 1
            );
            self.i = 0;
        }
        self.n_pushed += 1;

        Ok(())
    }

    fn check_shape(&self, tr: &Transition) -> Result<(), ReplayBufferError> {
        match (&self.shape_policy, &self.shape) {
            (ShapePolicy::Unchecked, _) => Ok(()),
            (_, Some(shape)) => shape.check(tr),
            // Current and next states must still agree.
            (_, None) => TransitionShape::of(tr).check(tr),
        }
    }

    /// Samples `batch_size` distinct transitions uniformly at random.
    ///
    /// The order of the transitions in the batch follows the draw. Only the
    /// internal random number generator is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayBufferError::InsufficientData`] if `batch_size` is zero
    /// or larger than [`ReplayBuffer::len`].
    pub fn sample(&mut self, batch_size: usize) -> Result<TransitionBatch, ReplayBufferError> {
        let available = self.slots.len();
        if batch_size == 0 || batch_size > available {
            return Err(ReplayBufferError::InsufficientData {
                requested: batch_size,
                available,
            });
        }

        let ixs = rand::seq::index::sample(&mut self.rng, available, batch_size);
        let mut batch = TransitionBatch::with_capacity(batch_size);
        for ix in ixs.into_iter() {
            batch.push(ix, &self.slots[ix]);
        }

        Ok(batch)
    }

    /// Returns the number of stored transitions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if the next append evicts a transition.
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Returns `max_history`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of successful appends since construction,
    /// including evicted ones.
    pub fn n_pushed(&self) -> u64 {
        self.n_pushed
    }

    /// Returns the shape accepted by the buffer, if established.
    ///
    /// Always `None` with [`ShapePolicy::Unchecked`].
    pub fn shape(&self) -> Option<&TransitionShape> {
        self.shape.as_ref()
    }

    /// Iterates over the stored transitions from the oldest to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> + '_ {
        let n = self.slots.len();
        let start = if self.is_full() { self.i } else { 0 };
        (0..n).map(move |k| &self.slots[(start + k) % n])
    }

    /// Returns the sum of the rewards of the stored transitions.
    pub fn sum_rewards(&self) -> f32 {
        self.slots.iter().map(|tr| tr.reward()).sum()
    }

    /// Drops all stored transitions.
    ///
    /// With [`ShapePolicy::FirstTransition`], the established shape is
    /// forgotten as well.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.i = 0;
        if self.shape_policy == ShapePolicy::FirstTransition {
            self.shape = None;
        }
    }
}

impl ExperienceBufferBase for ReplayBuffer {
    type Item = Transition;

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        Ok(ReplayBuffer::push(self, tr)?)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl ReplayBufferBase for ReplayBuffer {
    type Config = ReplayBufferConfig;
    type Batch = TransitionBatch;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(ReplayBuffer::with_config(config)?)
    }

    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        Ok(self.sample(size)?)
    }
}
