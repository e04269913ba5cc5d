use anyhow::Result;
use experience_replay::{
    Action, ActionBatch, ExperienceBufferBase, ReplayBuffer, ReplayBufferBase,
    ReplayBufferConfig, ReplayBufferError, Transition,
};
use ndarray::{ArrayD, IxDyn};
use std::collections::HashSet;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn transition(tag: usize, dim: usize) -> Transition {
    Transition::new(
        ArrayD::from_elem(IxDyn(&[dim]), tag as f32),
        Action::Discrete(tag as i64),
        tag as f32,
        ArrayD::from_elem(IxDyn(&[dim]), tag as f32 + 1.0),
    )
}

/// Fills a buffer through the generic interfaces, as a training loop would.
fn fill<R>(buffer: &mut R, n: usize) -> Result<()>
where
    R: ExperienceBufferBase<Item = Transition>,
{
    for tag in 0..n {
        buffer.push(transition(tag, 4))?;
    }
    Ok(())
}

fn train_step<R>(buffer: &mut R, batch_size: usize) -> Result<R::Batch>
where
    R: ReplayBufferBase,
{
    buffer.batch(batch_size)
}

#[test]
fn test_keeps_most_recent_transitions() -> Result<()> {
    init();
    for (capacity, n) in [(1, 5), (7, 3), (7, 7), (7, 30), (100, 250)].iter() {
        let mut buffer = ReplayBuffer::new(*capacity)?;
        fill(&mut buffer, *n)?;

        assert_eq!(buffer.len(), (*n).min(*capacity));
        let expected = (n.saturating_sub(*capacity)..*n).collect::<Vec<_>>();
        let stored = buffer
            .iter()
            .map(|tr| tr.reward() as usize)
            .collect::<Vec<_>>();
        assert_eq!(stored, expected);
    }
    Ok(())
}

#[test]
fn test_generic_training_loop() -> Result<()> {
    init();
    let config = ReplayBufferConfig::default().max_history(32).seed(0);
    let mut buffer = <ReplayBuffer as ReplayBufferBase>::build(&config)?;

    fill(&mut buffer, 10)?;
    assert!(train_step(&mut buffer, 11).is_err());

    fill(&mut buffer, 40)?;
    assert_eq!(ExperienceBufferBase::len(&buffer), 32);

    for _ in 0..20 {
        let batch = train_step(&mut buffer, 16)?;
        assert_eq!(batch.len(), 16);

        let tags = batch.reward.iter().map(|r| *r as usize).collect::<HashSet<_>>();
        assert_eq!(tags.len(), 16);
        assert!(tags.iter().all(|&t| t >= 8 && t < 40));

        let states = batch.stack_current_states()?;
        assert_eq!(states.shape(), &[16, 4]);
        match batch.stack_actions()? {
            ActionBatch::Discrete(acts) => {
                let rewards = batch.reward.iter().map(|r| *r as i64).collect::<Vec<_>>();
                assert_eq!(acts, rewards);
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }
    assert_eq!(buffer.len(), 32);
    Ok(())
}

#[test]
fn test_every_transition_is_eventually_sampled() -> Result<()> {
    init();
    let mut buffer = ReplayBuffer::new(10)?;
    fill(&mut buffer, 10)?;

    let mut seen = HashSet::new();
    for _ in 0..200 {
        for ix in buffer.sample(3)?.ix_sample {
            seen.insert(ix);
        }
    }
    assert_eq!(seen.len(), 10);
    Ok(())
}

#[test]
fn test_whole_buffer_sample_is_permutation() -> Result<()> {
    init();
    let mut buffer = ReplayBuffer::new(6)?;
    fill(&mut buffer, 9)?;

    let batch = buffer.sample(6)?;
    let mut tags = batch.reward.iter().map(|r| *r as usize).collect::<Vec<_>>();
    tags.sort_unstable();
    assert_eq!(tags, vec![3, 4, 5, 6, 7, 8]);
    Ok(())
}

#[test]
fn test_errors_are_recoverable() -> Result<()> {
    init();
    let mut buffer = ReplayBuffer::new(5)?;
    fill(&mut buffer, 2)?;

    let err = buffer.push(transition(2, 3)).unwrap_err();
    assert!(matches!(err, ReplayBufferError::ShapeMismatch { .. }));
    assert!(err.to_string().contains("current_state"));

    let err = buffer.sample(3).unwrap_err();
    assert!(matches!(
        err,
        ReplayBufferError::InsufficientData {
            requested: 3,
            available: 2
        }
    ));

    // The buffer keeps working after both failures.
    buffer.push(transition(2, 4))?;
    assert_eq!(buffer.sample(3)?.len(), 3);
    Ok(())
}
