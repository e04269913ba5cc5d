//! A one-dimensional random walk used to produce transitions.
use experience_replay::Action;
use ndarray::{arr1, ArrayD};

const N_ACTIONS: u32 = 2;
const BOUND: f32 = 1.0;
const STEP_SIZE: f32 = 0.1;

/// Agent position and velocity on `[-BOUND, BOUND]`.
///
/// Action 0 pushes left, action 1 pushes right. Reaching the right end gives
/// reward 1 and resets the walk, the left end gives -1.
pub struct RandomWalk {
    pos: f32,
    vel: f32,
}

/// Result of a single step.
pub struct Step {
    pub next_obs: ArrayD<f32>,
    pub reward: f32,
    pub is_done: bool,
}

impl RandomWalk {
    pub fn new() -> Self {
        Self { pos: 0.0, vel: 0.0 }
    }

    pub fn obs(&self) -> ArrayD<f32> {
        arr1(&[self.pos, self.vel]).into_dyn()
    }

    pub fn reset(&mut self) -> ArrayD<f32> {
        self.pos = (fastrand::f32() - 0.5) * BOUND;
        self.vel = 0.0;
        self.obs()
    }

    pub fn sample_action(&self) -> Action {
        Action::Discrete(fastrand::u32(..N_ACTIONS) as i64)
    }

    pub fn step(&mut self, act: &Action) -> Step {
        let dir = match act {
            Action::Discrete(0) => -1.0,
            Action::Discrete(_) => 1.0,
            Action::Continuous(a) => a.iter().sum::<f32>().signum(),
        };
        let noise = (fastrand::f32() - 0.5) * STEP_SIZE;
        self.vel = 0.9 * self.vel + STEP_SIZE * dir + noise;
        self.pos += self.vel;

        let (reward, is_done) = if self.pos >= BOUND {
            (1.0, true)
        } else if self.pos <= -BOUND {
            (-1.0, true)
        } else {
            (0.0, false)
        };

        Step {
            next_obs: self.obs(),
            reward,
            is_done,
        }
    }
}
