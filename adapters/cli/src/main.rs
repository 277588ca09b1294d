#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that simulates mastery scenarios and emits plots.

mod commands;

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mastery_calc_core::{
    mastery_level, Config, ConfigError, Fraction, MasteryKind, MasteryLevel, RewardKind, Tier,
};
use mastery_calc_presentation::{JsonSink, Plot, PlotSink};

#[derive(Debug, Parser)]
#[command(name = "mastery-calc", version)]
#[command(about = "Expected-value wave simulation comparing mastery upgrades")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate a sequence of wave counts with fixed mastery levels
    Waves {
        /// Wave counts to simulate
        #[arg(required = true)]
        waves: Vec<u32>,
        #[command(flatten)]
        simulation: SimulationArgs,
    },
    /// Compare every mastery at a single level against a baseline
    Compare {
        /// Wave count to simulate
        wave: u32,
        /// Level applied to each compared mastery (`locked` or 0-9)
        #[arg(long, short, default_value = "1", value_parser = parse_level)]
        level: LevelArg,
        /// Normalize all results against the baseline configuration
        #[arg(long, short)]
        relative: bool,
        /// Divide relative gains by each mastery's stone cost
        #[arg(long)]
        roi: bool,
        #[command(flatten)]
        simulation: SimulationArgs,
    },
    /// Compare every level of a single mastery
    Mastery {
        /// Wave count to simulate
        wave: u32,
        /// Mastery to vary
        mastery: MasteryKind,
        /// Normalize all results against the baseline configuration
        #[arg(long, short)]
        relative: bool,
        #[command(flatten)]
        simulation: SimulationArgs,
    },
}

/// Mastery level as given on the command line; `locked` parses to `None`.
#[derive(Clone, Copy, Debug)]
struct LevelArg(Option<MasteryLevel>);

fn parse_level(token: &str) -> Result<LevelArg, ConfigError> {
    mastery_level(token).map(LevelArg)
}

fn parse_tier(token: &str) -> Result<Tier> {
    let value: u8 = token
        .parse()
        .with_context(|| format!("tier '{token}' is not a number"))?;
    Ok(Tier::new(value)?)
}

fn parse_fraction(token: &str) -> Result<Fraction> {
    let value: f64 = token
        .parse()
        .with_context(|| format!("'{token}' is not a number"))?;
    Ok(Fraction::new(value)?)
}

#[derive(Debug, Args)]
struct SimulationArgs {
    /// Game tier [1-18]
    #[arg(long, value_parser = parse_tier)]
    tier: Option<Tier>,
    /// Reward to plot (coins, cells, rerolls, modules)
    #[arg(long)]
    reward: Option<RewardKind>,
    /// Average portion of kills to orbs [0.0-1.0]
    #[arg(long, value_parser = parse_fraction)]
    orb_kills: Option<Fraction>,
    /// Base chance of a recovery package per wave [0.0-1.0]
    #[arg(long, value_parser = parse_fraction)]
    recovery_chance: Option<Fraction>,
    /// Coin mastery level
    #[arg(long, value_parser = parse_level)]
    coin: Option<LevelArg>,
    /// Extra orb mastery level
    #[arg(long, value_parser = parse_level)]
    extra_orb: Option<LevelArg>,
    /// Critical coin mastery level
    #[arg(long, value_parser = parse_level)]
    critical_coin: Option<LevelArg>,
    /// Wave skip mastery level
    #[arg(long, value_parser = parse_level)]
    wave_skip: Option<LevelArg>,
    /// Intro sprint mastery level
    #[arg(long, value_parser = parse_level)]
    intro_sprint: Option<LevelArg>,
    /// Wave accelerator mastery level
    #[arg(long, value_parser = parse_level)]
    wave_accelerator: Option<LevelArg>,
    /// Enemy balance mastery level
    #[arg(long, value_parser = parse_level)]
    enemy_balance: Option<LevelArg>,
    /// Cash mastery level
    #[arg(long, value_parser = parse_level)]
    cash: Option<LevelArg>,
    /// Recovery package mastery level
    #[arg(long, value_parser = parse_level)]
    recovery_package: Option<LevelArg>,
    /// JSON scenario providing the base configuration
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// File receiving the plot JSON instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl SimulationArgs {
    fn mastery_levels(&self) -> [(MasteryKind, Option<LevelArg>); MasteryKind::COUNT] {
        [
            (MasteryKind::Coin, self.coin),
            (MasteryKind::ExtraOrb, self.extra_orb),
            (MasteryKind::CriticalCoin, self.critical_coin),
            (MasteryKind::WaveSkip, self.wave_skip),
            (MasteryKind::IntroSprint, self.intro_sprint),
            (MasteryKind::WaveAccelerator, self.wave_accelerator),
            (MasteryKind::EnemyBalance, self.enemy_balance),
            (MasteryKind::Cash, self.cash),
            (MasteryKind::RecoveryPackage, self.recovery_package),
        ]
    }

    /// Scenario file (or defaults) with every command-line override applied.
    fn base_config(&self, max_waves: u32) -> Result<Config> {
        let mut config = match &self.scenario {
            Some(path) => load_scenario(path)?,
            None => Config::default(),
        }
        .with_max_waves(max_waves);

        if let Some(tier) = self.tier {
            config = config.with_tier(tier);
        }
        if let Some(reward) = self.reward {
            config = config.with_reward_kind(reward);
        }
        if let Some(orb_kills) = self.orb_kills {
            config.orb_hit_fraction = orb_kills;
        }
        if let Some(chance) = self.recovery_chance {
            config.recovery_package_base_chance = chance;
        }
        for (kind, level) in self.mastery_levels() {
            if let Some(LevelArg(level)) = level {
                config = config.with_mastery_level(kind, level);
            }
        }
        Ok(config)
    }
}

fn load_scenario(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse scenario {}", path.display()))
}

fn emit(plot: &Plot, output: Option<&Path>) -> Result<()> {
    for label in plot.legend() {
        log::info!("{}", label.replace('\n', " "));
    }
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            JsonSink::new(BufWriter::new(file)).render(plot)?;
            log::info!("plot saved as {}", path.display());
            Ok(())
        }
        None => JsonSink::new(io::stdout().lock()).render(plot),
    }
}

/// Entry point for the mastery calculator command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (plot, output) = match &cli.command {
        Command::Waves { waves, simulation } => {
            let base = simulation.base_config(waves.iter().copied().max().unwrap_or_default())?;
            (commands::waves(&base, waves), simulation.output.as_deref())
        }
        Command::Compare {
            wave,
            level: LevelArg(level),
            relative,
            roi,
            simulation,
        } => {
            let base = simulation.base_config(*wave)?;
            let options = commands::CompareOptions {
                relative: *relative,
                roi: *roi,
            };
            (
                commands::compare(&base, *level, options)?,
                simulation.output.as_deref(),
            )
        }
        Command::Mastery {
            wave,
            mastery,
            relative,
            simulation,
        } => {
            let base = simulation.base_config(*wave)?;
            (
                commands::mastery(&base, *mastery, *relative)?,
                simulation.output.as_deref(),
            )
        }
    };

    emit(&plot, output)
}
