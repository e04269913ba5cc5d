//! Shapes of transitions and the policy for validating them.
use crate::{error::ReplayBufferError, Action, Transition};
use serde::{Deserialize, Serialize};

/// Shape of an action.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub enum ActionShape {
    /// Scalar discrete index.
    Discrete,

    /// Continuous action with the given array shape.
    Continuous(Vec<usize>),
}

impl ActionShape {
    /// Returns the shape of the given action.
    pub fn of(act: &Action) -> Self {
        match act {
            Action::Discrete(_) => Self::Discrete,
            Action::Continuous(a) => Self::Continuous(a.shape().to_vec()),
        }
    }
}

/// Shape of a transition.
///
/// `state` applies to both the current and the next state.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct TransitionShape {
    /// Shape of states.
    pub state: Vec<usize>,

    /// Shape of actions.
    pub action: ActionShape,
}

impl TransitionShape {
    /// Constructs a shape from state dimensions and an action shape.
    pub fn new(state: impl Into<Vec<usize>>, action: ActionShape) -> Self {
        Self {
            state: state.into(),
            action,
        }
    }

    /// Returns the shape of the given transition, taken from its current state.
    pub fn of(tr: &Transition) -> Self {
        Self {
            state: tr.current_state().shape().to_vec(),
            action: ActionShape::of(tr.action()),
        }
    }

    /// Checks that `tr` conforms to this shape.
    pub fn check(&self, tr: &Transition) -> Result<(), ReplayBufferError> {
        check_state("current_state", &self.state, tr.current_state().shape())?;
        check_state("next_state", &self.state, tr.next_state().shape())?;

        let action = ActionShape::of(tr.action());
        if action != self.action {
            return Err(ReplayBufferError::ShapeMismatch {
                field: "action",
                expected: format!("{:?}", self.action),
                actual: format!("{:?}", action),
            });
        }

        Ok(())
    }
}

fn check_state(
    field: &'static str,
    expected: &[usize],
    actual: &[usize],
) -> Result<(), ReplayBufferError> {
    if expected != actual {
        return Err(ReplayBufferError::ShapeMismatch {
            field,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        });
    }
    Ok(())
}

/// Determines which transition shapes a replay buffer accepts.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub enum ShapePolicy {
    /// The first appended transition fixes the shape.
    FirstTransition,

    /// The shape is given at construction.
    Fixed(TransitionShape),

    /// Any shape is accepted.
    ///
    /// Use this when the shapes of states or actions change across episodes.
    /// Batches of mixed shapes cannot be stacked.
    Unchecked,
}

impl Default for ShapePolicy {
    fn default() -> Self {
        Self::FirstTransition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, ArrayD, IxDyn};

    fn transition(dim_state: usize, act: Action) -> Transition {
        Transition::new(
            ArrayD::zeros(IxDyn(&[dim_state])),
            act,
            0.0,
            ArrayD::zeros(IxDyn(&[dim_state])),
        )
    }

    #[test]
    fn test_shape_of_transition() {
        let tr = transition(4, Action::Continuous(arr1(&[0.1f32, 0.2]).into_dyn()));
        let shape = TransitionShape::of(&tr);
        assert_eq!(shape.state, vec![4]);
        assert_eq!(shape.action, ActionShape::Continuous(vec![2]));
        assert!(shape.check(&tr).is_ok());
    }

    #[test]
    fn test_check_rejects_state_and_action() {
        let shape = TransitionShape::new([4], ActionShape::Discrete);
        assert!(shape.check(&transition(4, Action::Discrete(1))).is_ok());

        match shape.check(&transition(3, Action::Discrete(1))) {
            Err(ReplayBufferError::ShapeMismatch { field, .. }) => assert_eq!(field, "current_state"),
            other => panic!("unexpected result: {:?}", other),
        }

        let tr = transition(4, Action::Continuous(arr1(&[0.0f32]).into_dyn()));
        match shape.check(&tr) {
            Err(ReplayBufferError::ShapeMismatch { field, .. }) => assert_eq!(field, "action"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_rejects_next_state() {
        let shape = TransitionShape::new([2], ActionShape::Discrete);
        let tr = Transition::new(
            ArrayD::zeros(IxDyn(&[2])),
            Action::Discrete(0),
            0.0,
            ArrayD::zeros(IxDyn(&[2, 1])),
        );
        match shape.check(&tr) {
            Err(ReplayBufferError::ShapeMismatch { field, .. }) => assert_eq!(field, "next_state"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
