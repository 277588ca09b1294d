#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reward accrual engine that folds per-wave expectations into a cumulative
//! trajectory.
//!
//! The engine is a first-order recurrence: every wave's reward depends on the
//! reward granted by the wave before it, because a skipped wave replays the
//! previous wave's reward instead of producing a fresh one. [`Run`] walks the
//! recurrence lazily and yields one [`WaveResult`] per wave, starting with the
//! zero snapshot for wave 0.

pub mod formulas;

use mastery_calc_core::{
    Config, EnemyKind, EventTotals, MasteryKind, Rewards, RunResult, Trajectory, WaveEvents,
    WaveResult,
};
use mastery_calc_system_wave_events::compute_wave_events;
use mastery_calc_tables as tables;

/// Stage of the run a wave belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Intro wave that is actually played and costs wall-clock time.
    IntroPlayed,
    /// Intro wave that is skipped outright.
    IntroSkipped,
    /// First wave after the intro. It always runs in full.
    Transition,
    /// Every later wave.
    Regular,
}

impl Phase {
    /// Classifies `wave` for a run whose intro ends at `intro_length`.
    #[must_use]
    pub const fn of(wave: u32, intro_length: u32) -> Self {
        if wave < intro_length {
            if wave == 1 || wave % tables::INTRO_REAL_WAVE_PERIOD == 0 {
                Self::IntroPlayed
            } else {
                Self::IntroSkipped
            }
        } else if wave == intro_length {
            Self::Transition
        } else {
            Self::Regular
        }
    }

    /// Returns `true` for both intro stages.
    #[must_use]
    pub const fn is_intro(self) -> bool {
        matches!(self, Self::IntroPlayed | Self::IntroSkipped)
    }

    /// Overrides the model's wave events where the phase dictates them.
    ///
    /// Played intro waves always hold a boss and skipped ones never do.
    fn apply(self, events: &mut WaveEvents) {
        match self {
            Self::IntroPlayed => {
                events.wave_skip_probability = 0.0;
                events.expected_enemy_counts[EnemyKind::Boss] = 1.0;
            }
            Self::IntroSkipped => {
                events.wave_skip_probability = 1.0;
                events.expected_enemy_counts[EnemyKind::Boss] = 0.0;
            }
            Self::Transition => events.wave_skip_probability = 0.0,
            Self::Regular => {}
        }
    }

    /// Intro waves only grant a fraction of the elite cells.
    fn suppress(self, rewards: Rewards) -> Rewards {
        if self.is_intro() {
            Rewards {
                elite_cells: rewards.elite_cells * tables::INTRO_CELL_FRACTION,
                ..Rewards::ZERO
            }
        } else {
            rewards
        }
    }
}

/// First regular wave of the run. Intro sprint extends the intro.
#[must_use]
pub fn intro_length(config: &Config) -> u32 {
    config
        .level(MasteryKind::IntroSprint)
        .map_or(tables::DEFAULT_INTRO_LENGTH, |level| {
            tables::INTRO_SPRINT_MASTERY_TABLE[level.index()]
        })
}

/// Lazily evaluated run. Cloning the iterator restarts from the same point.
#[derive(Clone, Debug)]
pub struct Run<'a> {
    config: &'a Config,
    intro_length: u32,
    next_wave: Option<u32>,
    phase: Option<Phase>,
    previous_boss: bool,
    elapsed_time: f64,
    events: EventTotals,
    rewards: Rewards,
    previous_rewards: Rewards,
}

impl<'a> Run<'a> {
    /// Creates a run positioned before the wave 0 snapshot.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        let intro_length = intro_length(config);
        log::debug!(
            "simulating '{}': tier {}, {} waves, intro until wave {}",
            config.name,
            config.tier.get(),
            config.max_waves,
            intro_length
        );
        Self {
            config,
            intro_length,
            next_wave: Some(0),
            phase: None,
            previous_boss: false,
            elapsed_time: 0.0,
            events: EventTotals::default(),
            rewards: Rewards::ZERO,
            previous_rewards: Rewards::ZERO,
        }
    }

    fn advance(&mut self, wave: u32) -> WaveResult {
        let phase = Phase::of(wave, self.intro_length);
        if self.phase != Some(phase) {
            log::trace!("'{}' enters {phase:?} at wave {wave}", self.config.name);
            self.phase = Some(phase);
        }

        let mut events = compute_wave_events(self.config, wave);
        phase.apply(&mut events);
        // Recovery packages follow the bosses that actually spawned.
        events.recovery_package_probability = if self.previous_boss {
            1.0
        } else {
            self.config.recovery_package_base_chance.get()
        };
        self.previous_boss = events.expected_enemy_counts[EnemyKind::Boss] > 0.0;
        let rewards = phase.suppress(formulas::wave_rewards(
            self.config,
            &events,
            &self.previous_rewards,
        ));

        self.elapsed_time +=
            (tables::WAVE_DURATION + tables::WAVE_COOLDOWN) * (1.0 - events.wave_skip_probability);
        self.rewards += rewards;
        self.events.record(&events);
        self.previous_rewards = rewards;

        WaveResult {
            wave,
            elapsed_time: self.elapsed_time,
            cumulative_events: self.events.clone(),
            cumulative_rewards: self.rewards,
        }
    }
}

impl Iterator for Run<'_> {
    type Item = WaveResult;

    fn next(&mut self) -> Option<Self::Item> {
        let wave = self
            .next_wave
            .filter(|wave| *wave <= self.config.max_waves)?;
        self.next_wave = wave.checked_add(1);

        let result = if wave == 0 {
            WaveResult::initial()
        } else {
            self.advance(wave)
        };
        if wave == self.config.max_waves {
            log::debug!(
                "'{}' finished after {:.0}s: {:?}",
                self.config.name,
                self.elapsed_time,
                self.rewards
            );
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next_wave.map_or(0, |wave| {
            (self.config.max_waves as usize)
                .saturating_add(1)
                .saturating_sub(wave as usize)
        });
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Run<'_> {}

/// Starts a lazy run of `config`.
#[must_use]
pub fn simulate_run(config: &Config) -> Run<'_> {
    Run::new(config)
}

/// Runs `config` to completion.
#[must_use]
pub fn simulate_trajectory(config: &Config) -> Trajectory {
    Trajectory::new(simulate_run(config).collect())
        .expect("accrual emits strictly increasing waves and non-decreasing time")
}

/// Runs `config` to completion and records the terminal value of its reward
/// kind as the run's total.
#[must_use]
pub fn simulate(config: &Config) -> RunResult {
    let mut result = RunResult::new(config, simulate_trajectory(config));
    result.total = Some(result.terminal_value());
    result
}
