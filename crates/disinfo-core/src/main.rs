//! Disinformation Spread Simulator
//!
//! Builds a population, runs the belief-state model for a number of steps,
//! and exports the per-step counts, final agents, and a run summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use disinfo_core::output::export_run;
use disinfo_core::{default_config_toml, CancelToken, Simulation, SimulationConfig, SocialPlatform};

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "disinfo_sim")]
#[command(about = "Agent-based simulation of disinformation spread")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of steps to simulate
    #[arg(long)]
    steps: Option<usize>,

    /// Number of agents
    #[arg(long)]
    agents: Option<usize>,

    /// Agents exposed at the start
    #[arg(long)]
    initial_believing: Option<usize>,

    /// Eligible platform (repeatable; none means all)
    #[arg(long = "platform")]
    platforms: Vec<SocialPlatform>,

    /// Directory for exported files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip writing export files
    #[arg(long)]
    no_export: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

impl Args {
    /// Applies command line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(steps) = self.steps {
            config.simulation.steps = steps;
        }
        if let Some(agents) = self.agents {
            config.population.agents = agents;
        }
        if let Some(initial) = self.initial_believing {
            config.population.initial_believing = initial;
        }
        if !self.platforms.is_empty() {
            config.population.platforms = self.platforms.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.no_export {
            config.output.export = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    init_tracing();

    let mut config = SimulationConfig::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    args.apply(&mut config);

    let setup = config.to_setup().context("invalid configuration")?;
    let run = &config.simulation;

    println!("Disinformation Spread Simulator");
    println!("===============================");
    println!("Seed: {}", run.seed);
    println!("Steps: {}", run.steps);
    println!("Agents: {}", config.population.agents);
    println!(
        "Rates: alpha={} beta={} gamma={} delta={} theta={}",
        config.rates.alpha, config.rates.beta, config.rates.gamma, config.rates.delta, config.rates.theta
    );
    println!();

    let mut simulation = Simulation::new(setup, run.seed).context("failed to build population")?;
    println!("Step 0: {}", simulation.counts());

    let interval = run.report_interval;
    let total = run.steps;
    let outcome = simulation.run_with(total, &CancelToken::new(), |step, counts| {
        if interval > 0 && step % interval == 0 {
            println!("Step {}/{}: {}", step, total, counts);
        }
    });

    println!();
    println!("Finished after {} steps ({})", outcome.steps, outcome.stop_reason);
    println!("Final: {}", outcome.final_counts);

    let summary = simulation.summary(outcome.stop_reason);
    if let Some(peak) = summary.peak_infected {
        println!("Peak INFECTED: {} at step {}", peak.count, peak.step);
    }

    if config.output.export {
        let paths = export_run(
            &config.output.dir,
            simulation.history(),
            simulation.engine().agents(),
            &summary,
        )
        .with_context(|| format!("failed to export to {}", config.output.dir.display()))?;
        println!("Wrote {}", paths.step_counts.display());
        println!("Wrote {}", paths.agents.display());
        println!("Wrote {}", paths.summary.display());
    }

    info!(run_id = %summary.run_id, "Done");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
