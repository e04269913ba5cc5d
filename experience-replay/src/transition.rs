//! Transition `(o_t, a_t, r_t, o_t+1)`.
use ndarray::ArrayD;

/// An action taken in an environment.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Index of a discrete action.
    Discrete(i64),

    /// Continuous action.
    Continuous(ArrayD<f32>),
}

impl From<i64> for Action {
    fn from(a: i64) -> Self {
        Self::Discrete(a)
    }
}

impl From<ArrayD<f32>> for Action {
    fn from(a: ArrayD<f32>) -> Self {
        Self::Continuous(a)
    }
}

/// A transition observed at a single environment step.
///
/// A transition is immutable once created. The fields can be read with
/// the getters or taken out with [`Transition::into_parts`].
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    current_state: ArrayD<f32>,
    action: Action,
    reward: f32,
    next_state: ArrayD<f32>,
}

impl Transition {
    /// Constructs a transition.
    pub fn new(
        current_state: ArrayD<f32>,
        action: impl Into<Action>,
        reward: f32,
        next_state: ArrayD<f32>,
    ) -> Self {
        Self {
            current_state,
            action: action.into(),
            reward,
            next_state,
        }
    }

    /// State `o_t`.
    pub fn current_state(&self) -> &ArrayD<f32> {
        &self.current_state
    }

    /// Action `a_t`.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Reward `r_t`.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// State `o_t+1`.
    pub fn next_state(&self) -> &ArrayD<f32> {
        &self.next_state
    }

    /// Decomposes the transition into `(o_t, a_t, r_t, o_t+1)`.
    pub fn into_parts(self) -> (ArrayD<f32>, Action, f32, ArrayD<f32>) {
        (self.current_state, self.action, self.reward, self.next_state)
    }
}
