//! Fills a replay buffer from a random walk and samples training batches.
mod env;

use anyhow::Result;
use clap::Parser;
use env::RandomWalk;
use experience_replay::{ReplayBuffer, ReplayBufferConfig, ReplayBufferError};
use log::info;
use std::path::PathBuf;

const WARMUP_PERIOD: usize = 100;
const LOG_INTERVAL: usize = 1_000;

/// Collect random-walk transitions into a replay buffer and sample from it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file of the replay buffer config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of environment steps
    #[arg(short, long, default_value_t = 5_000)]
    steps: usize,

    /// Number of transitions per sampled batch
    #[arg(short, long, default_value_t = 64)]
    batch_size: usize,

    /// Seed of the environment
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the config in effect to this file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

/// Summary of a run.
#[derive(Debug, Default)]
struct Stats {
    n_episodes: usize,
    n_batches: usize,
    n_skipped: usize,
}

fn run(config: &ReplayBufferConfig, steps: usize, batch_size: usize) -> Result<Stats> {
    let mut buffer = ReplayBuffer::with_config(config)?;
    let mut env = RandomWalk::new();
    let mut obs = env.reset();
    let mut stats = Stats::default();

    for step in 1..=steps {
        let act = env.sample_action();
        let res = env.step(&act);
        buffer.append(obs, act, res.reward, res.next_obs.clone())?;

        obs = if res.is_done {
            stats.n_episodes += 1;
            env.reset()
        } else {
            res.next_obs
        };

        if step < WARMUP_PERIOD {
            continue;
        }

        match buffer.sample(batch_size) {
            Ok(batch) => {
                stats.n_batches += 1;
                if step % LOG_INTERVAL == 0 {
                    let states = batch.stack_current_states()?;
                    let mean_reward = batch.reward.iter().sum::<f32>() / batch.len() as f32;
                    info!(
                        "step = {}, buffer = {}/{}, batch states {:?}, mean reward = {:.3}",
                        step,
                        buffer.len(),
                        buffer.capacity(),
                        states.shape(),
                        mean_reward
                    );
                }
            }
            Err(ReplayBufferError::InsufficientData { .. }) => stats.n_skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        "Finished: {} episodes, {} batches, {} skipped, sum of stored rewards = {}",
        stats.n_episodes,
        stats.n_batches,
        stats.n_skipped,
        buffer.sum_rewards()
    );
    Ok(stats)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    fastrand::seed(args.seed);

    let config = match &args.config {
        Some(path) => ReplayBufferConfig::load(path)?,
        None => ReplayBufferConfig::default(),
    };
    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!("Saved the config in {:?}", path);
    }

    run(&config, args.steps, args.batch_size)?;

    Ok(())
}
