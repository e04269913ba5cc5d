//! Batch of transitions sampled from a replay buffer.
use crate::{error::ReplayBufferError, Action, Transition};
use ndarray::{ArrayD, Axis, ErrorKind, ShapeError};

/// Actions of a batch stacked into a single container.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionBatch {
    /// Indices of discrete actions.
    Discrete(Vec<i64>),

    /// Continuous actions with a leading batch axis.
    Continuous(ArrayD<f32>),
}

/// Transitions drawn from a replay buffer.
///
/// The fields are parallel: the `k`-th element of each vector belongs to the
/// same transition. The order follows the random draw and carries no meaning.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionBatch {
    /// States `o_t`.
    pub current_state: Vec<ArrayD<f32>>,

    /// Actions `a_t`.
    pub action: Vec<Action>,

    /// Rewards `r_t`.
    pub reward: Vec<f32>,

    /// States `o_t+1`.
    pub next_state: Vec<ArrayD<f32>>,

    /// Slot indices of the sampled transitions in the buffer.
    pub ix_sample: Vec<usize>,
}

impl TransitionBatch {
    /// Creates an empty batch with room for `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current_state: Vec::with_capacity(capacity),
            action: Vec::with_capacity(capacity),
            reward: Vec::with_capacity(capacity),
            next_state: Vec::with_capacity(capacity),
            ix_sample: Vec::with_capacity(capacity),
        }
    }

    pub(super) fn push(&mut self, ix: usize, tr: &Transition) {
        self.current_state.push(tr.current_state().clone());
        self.action.push(tr.action().clone());
        self.reward.push(tr.reward());
        self.next_state.push(tr.next_state().clone());
        self.ix_sample.push(ix);
    }

    /// Returns the number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if the batch has no transitions.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Decomposes the batch into `(o_t, a_t, r_t, o_t+1)`.
    pub fn unpack(self) -> (Vec<ArrayD<f32>>, Vec<Action>, Vec<f32>, Vec<ArrayD<f32>>) {
        (self.current_state, self.action, self.reward, self.next_state)
    }

    /// Stacks the current states along a new leading batch axis.
    pub fn stack_current_states(&self) -> Result<ArrayD<f32>, ReplayBufferError> {
        stack(&self.current_state)
    }

    /// Stacks the next states along a new leading batch axis.
    pub fn stack_next_states(&self) -> Result<ArrayD<f32>, ReplayBufferError> {
        stack(&self.next_state)
    }

    /// Stacks the actions.
    ///
    /// Fails if the batch is empty or mixes discrete and continuous actions.
    pub fn stack_actions(&self) -> Result<ActionBatch, ReplayBufferError> {
        match self.action.first() {
            None => Err(ShapeError::from_kind(ErrorKind::OutOfBounds).into()),
            Some(Action::Discrete(_)) => self
                .action
                .iter()
                .map(|a| match a {
                    Action::Discrete(a) => Ok(*a),
                    Action::Continuous(_) => Err(incompatible()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ActionBatch::Discrete),
            Some(Action::Continuous(_)) => {
                let acts = self
                    .action
                    .iter()
                    .map(|a| match a {
                        Action::Continuous(a) => Ok(a.view()),
                        Action::Discrete(_) => Err(incompatible()),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ActionBatch::Continuous(ndarray::stack(Axis(0), &acts)?))
            }
        }
    }
}

fn incompatible() -> ReplayBufferError {
    ShapeError::from_kind(ErrorKind::IncompatibleShape).into()
}

fn stack(xs: &[ArrayD<f32>]) -> Result<ArrayD<f32>, ReplayBufferError> {
    let views = xs.iter().map(|x| x.view()).collect::<Vec<_>>();
    Ok(ndarray::stack(Axis(0), &views)?)
}
