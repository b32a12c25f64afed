//! Scripted rollout in the collaborative hallway
//!
//! Plays episodes with the scripted policy: the Spotter announces the symbol
//! it sees and the Seeker walks to the matching goal. An optional JSON
//! config path overrides the defaults.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example scripted_rollout --release
//! cargo run --example scripted_rollout --release -- hallway.json
//! ```

use anyhow::Result;
use hallway_collab::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    const EPISODES: usize = 20;

    let config = match std::env::args().nth(1) {
        Some(path) => HallwayConfig::from_json_file(path)?,
        None => HallwayConfig::new().seed(42),
    };

    tracing::info!("Environment: Collaborative Hallway");
    tracing::info!("  Max steps: {}", config.max_steps);
    tracing::info!("  Message vocab: {}", config.comm.message_vocab);
    tracing::info!("  Comm policy: {:?}", config.comm.policy);

    let mut env = HallwayCollabEnv::new(config)?;
    let policy = HeuristicPolicy::new(env.layout());

    for episode in 1..=EPISODES {
        let mut observations = env.reset()?;
        let selection = env.episode_state().map(|s| s.selection());

        loop {
            let result = env.step_multi(&policy.act_all(&observations))?;
            if result.all_done() {
                tracing::info!(
                    "Episode {:>3} | selection {:?} | {:?} after {} ticks | reward {:.3}",
                    episode,
                    selection,
                    result.info.end_reason,
                    result.info.steps,
                    env.agent(Role::Seeker).cumulative_reward
                );
                break;
            }
            observations = result.observations;
        }
    }

    let stats = env.stats();
    tracing::info!("Success rate: {:.1}%", stats.success_rate() * 100.0);
    tracing::info!("Mean length: {:.1} ticks", stats.mean_length());
    println!("{}", serde_json::to_string_pretty(stats)?);

    Ok(())
}
