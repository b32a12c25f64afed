//! Parallel rollout over many hallway arenas
//!
//! Steps a pool of independent arenas with Rayon and reports merged
//! episode statistics.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example parallel_rollout --release
//! ```

use std::time::Instant;

use anyhow::Result;
use hallway_collab::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    const NUM_ENVS: usize = 16;
    const TOTAL_TICKS: usize = 50_000;

    let mut pool = MultiAgentPool::new(
        |i| HallwayCollabEnv::new(HallwayConfig::new().seed(1000 + i as u64).max_steps(500)),
        NUM_ENVS,
    )?;
    let policy = HeuristicPolicy::new(pool.envs()[0].layout());

    tracing::info!("Parallel hallway rollout");
    tracing::info!("  Num envs: {}", NUM_ENVS);
    tracing::info!("  Spotter observation: {:?}", pool.observation_space(0));
    tracing::info!("  Seeker observation: {:?}", pool.observation_space(1));
    tracing::info!("  Action space: {:?}", pool.action_space(0));

    let start = Instant::now();
    let mut observations = pool.reset()?;
    let mut ticks = 0;

    while ticks < TOTAL_TICKS {
        let actions: Vec<_> = observations.iter().map(|obs| policy.act_all(obs)).collect();
        observations = pool.step(&actions)?.next_observations;
        ticks += NUM_ENVS;
    }

    let elapsed = start.elapsed().as_secs_f64();
    let stats = pool.stats();
    tracing::info!("Ticks: {} ({:.0} ticks/s)", ticks, ticks as f64 / elapsed);
    tracing::info!("Episodes: {} | success rate {:.1}%", stats.episodes, stats.success_rate() * 100.0);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
