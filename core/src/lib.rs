#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the mastery calculator.
//!
//! This crate defines the values that flow between the pure systems. A
//! [`Config`] describes one scenario, the wave event system turns it into
//! per-wave [`WaveEvents`], the accrual system folds those into a
//! [`Trajectory`] of [`WaveResult`] snapshots, and the normalization system
//! compares trajectories by producing new [`RunResult`] values. Every type here
//! is plain data: construction validates invariants, nothing mutates after
//! the fact.

use std::{
    collections::BTreeMap,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Index, IndexMut, Mul, Sub},
    str::FromStr,
};

use mastery_calc_tables as tables;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod config;

pub use config::{mastery_config, mastery_level, waves_config, Config};

/// Errors raised when a configuration value violates its documented range.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Tier outside `1..=18`.
    #[error("tier {value} is outside 1..={max}", max = tables::TIER_COUNT)]
    TierOutOfRange {
        /// Rejected tier.
        value: u8,
    },
    /// Mastery level outside `0..=9`.
    #[error("mastery level {value} is outside 0..={max}", max = tables::MASTERY_LEVEL_COUNT - 1)]
    MasteryLevelOutOfRange {
        /// Rejected level.
        value: u8,
    },
    /// Mastery level token that is neither `locked` nor a level number.
    #[error("invalid mastery level: {0}")]
    InvalidMasteryLevel(String),
    /// Probability or share outside `[0, 1]`.
    #[error("fraction {value} is outside [0, 1]")]
    FractionOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// Identifier that names no mastery.
    #[error("unknown mastery: {0}")]
    UnknownMastery(String),
    /// Identifier that names no reward kind.
    #[error("unknown reward kind: {0}")]
    UnknownRewardKind(String),
}

/// Errors raised when snapshots do not form a valid trajectory.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TrajectoryError {
    /// A trajectory requires at least one snapshot.
    #[error("trajectory contains no snapshots")]
    Empty,
    /// Wave numbers must strictly increase.
    #[error("wave {wave} does not follow wave {previous}")]
    WaveOrder {
        /// Wave of the preceding snapshot.
        previous: u32,
        /// Offending wave.
        wave: u32,
    },
    /// Elapsed time must be finite and never decrease.
    #[error("elapsed time {elapsed_time} at wave {wave} precedes {previous}")]
    TimeOrder {
        /// Offending wave.
        wave: u32,
        /// Elapsed time of the preceding snapshot.
        previous: f64,
        /// Offending elapsed time.
        elapsed_time: f64,
    },
}

/// Game tier selecting the tier-indexed tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    /// Lowest tier.
    pub const MIN: Self = Self(1);

    /// Creates a tier, rejecting values outside `1..=18`.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        if value == 0 || usize::from(value) > tables::TIER_COUNT {
            return Err(ConfigError::TierOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// One-based tier number.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Zero-based index into tier tables.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Tier {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

/// Unlocked mastery level, a valid index into every mastery table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    /// Creates a level, rejecting values outside `0..=9`.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        if usize::from(value) >= tables::MASTERY_LEVEL_COUNT {
            return Err(ConfigError::MasteryLevelOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Iterates every level in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..tables::MASTERY_LEVEL_COUNT as u8).map(Self)
    }

    /// Numeric level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Index into mastery tables.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Probability or share restricted to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fraction(f64);

impl Fraction {
    /// The impossible event.
    pub const ZERO: Self = Self(0.0);
    /// The certain event.
    pub const ONE: Self = Self(1.0);

    /// Creates a fraction, rejecting non-finite values and values outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::FractionOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Underlying value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Fraction {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(fraction: Fraction) -> Self {
        fraction.0
    }
}

/// Closed set of masteries a player can unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasteryKind {
    /// Multiplies every coin drop.
    Coin,
    /// Multiplies coins from kills made by orbs.
    ExtraOrb,
    /// Boosts basic enemy coin drops.
    CriticalCoin,
    /// Lets a wave skip become a double skip.
    WaveSkip,
    /// Lengthens the intro sprint.
    IntroSprint,
    /// Reaches higher spawn rates at earlier waves.
    WaveAccelerator,
    /// Raises the elite double-spawn chance.
    EnemyBalance,
    /// Lets elites drop reroll shards.
    Cash,
    /// Lets recovery packages contain modules.
    RecoveryPackage,
}

impl MasteryKind {
    /// Number of masteries.
    pub const COUNT: usize = 9;

    /// Every mastery in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Coin,
        Self::ExtraOrb,
        Self::CriticalCoin,
        Self::WaveSkip,
        Self::IntroSprint,
        Self::WaveAccelerator,
        Self::EnemyBalance,
        Self::Cash,
        Self::RecoveryPackage,
    ];

    /// Position of the mastery within [`MasteryKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kebab-case identifier used on the command line and in scenario files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::ExtraOrb => "extra-orb",
            Self::CriticalCoin => "critical-coin",
            Self::WaveSkip => "wave-skip",
            Self::IntroSprint => "intro-sprint",
            Self::WaveAccelerator => "wave-accelerator",
            Self::EnemyBalance => "enemy-balance",
            Self::Cash => "cash",
            Self::RecoveryPackage => "recovery-package",
        }
    }

    /// Short name used in plot titles.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Coin => "Coin",
            Self::ExtraOrb => "EO",
            Self::CriticalCoin => "CritCoin",
            Self::WaveSkip => "WS",
            Self::IntroSprint => "IS",
            Self::WaveAccelerator => "WA",
            Self::EnemyBalance => "EB",
            Self::Cash => "Cash",
            Self::RecoveryPackage => "RP",
        }
    }

    /// Stone cost used to normalize a mastery's benefit.
    #[must_use]
    pub const fn stone_cost(self) -> f64 {
        match self {
            Self::Coin => tables::COIN_STONE_COST,
            Self::ExtraOrb => tables::EXTRA_ORB_STONE_COST,
            Self::CriticalCoin => tables::CRITICAL_COIN_STONE_COST,
            Self::WaveSkip => tables::WAVE_SKIP_STONE_COST,
            Self::IntroSprint => tables::INTRO_SPRINT_STONE_COST,
            Self::WaveAccelerator => tables::WAVE_ACCELERATOR_STONE_COST,
            Self::EnemyBalance => tables::ENEMY_BALANCE_STONE_COST,
            Self::Cash => tables::CASH_STONE_COST,
            Self::RecoveryPackage => tables::RECOVERY_PACKAGE_STONE_COST,
        }
    }

    /// Per-level scalar bonus table, or `None` for masteries whose effect is
    /// structural (intro sprint, wave accelerator).
    #[must_use]
    pub const fn scalar_table(self) -> Option<&'static [f64; tables::MASTERY_LEVEL_COUNT]> {
        match self {
            Self::Coin => Some(&tables::COIN_MASTERY_TABLE),
            Self::ExtraOrb => Some(&tables::EXTRA_ORB_MASTERY_TABLE),
            Self::CriticalCoin => Some(&tables::CRITICAL_COIN_MASTERY_TABLE),
            Self::WaveSkip => Some(&tables::WAVE_SKIP_MASTERY_TABLE),
            Self::EnemyBalance => Some(&tables::ENEMY_BALANCE_MASTERY_TABLE),
            Self::Cash => Some(&tables::CASH_MASTERY_TABLE),
            Self::RecoveryPackage => Some(&tables::RECOVERY_PACKAGE_MASTERY_TABLE),
            Self::IntroSprint | Self::WaveAccelerator => None,
        }
    }
}

impl fmt::Display for MasteryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MasteryKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| ConfigError::UnknownMastery(value.to_owned()))
    }
}

/// Level of every mastery; `None` marks a locked mastery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<MasteryKind, Option<MasteryLevel>>",
    into = "BTreeMap<MasteryKind, Option<MasteryLevel>>"
)]
pub struct Masteries {
    levels: [Option<MasteryLevel>; MasteryKind::COUNT],
}

impl Masteries {
    /// Every mastery locked.
    pub const LOCKED: Self = Self {
        levels: [None; MasteryKind::COUNT],
    };

    /// Level of the provided mastery, `None` when locked.
    #[must_use]
    pub const fn level(&self, kind: MasteryKind) -> Option<MasteryLevel> {
        self.levels[kind.index()]
    }

    /// Returns a copy with one mastery set to the provided level.
    #[must_use]
    pub fn with_level(mut self, kind: MasteryKind, level: Option<MasteryLevel>) -> Self {
        self.levels[kind.index()] = level;
        self
    }

    /// Bonus from the mastery's scalar table, `None` when locked.
    ///
    /// # Panics
    ///
    /// Panics when called for a mastery without a scalar table.
    #[must_use]
    pub fn scalar(&self, kind: MasteryKind) -> Option<f64> {
        let table = kind
            .scalar_table()
            .unwrap_or_else(|| panic!("{kind} has no scalar bonus table"));
        self.level(kind).map(|level| table[level.index()])
    }

    /// Iterates the unlocked masteries with their levels.
    pub fn unlocked(&self) -> impl Iterator<Item = (MasteryKind, MasteryLevel)> + '_ {
        MasteryKind::ALL
            .into_iter()
            .filter_map(|kind| self.level(kind).map(|level| (kind, level)))
    }
}

impl From<BTreeMap<MasteryKind, Option<MasteryLevel>>> for Masteries {
    fn from(map: BTreeMap<MasteryKind, Option<MasteryLevel>>) -> Self {
        map.into_iter()
            .fold(Self::LOCKED, |masteries, (kind, level)| {
                masteries.with_level(kind, level)
            })
    }
}

impl From<Masteries> for BTreeMap<MasteryKind, Option<MasteryLevel>> {
    fn from(masteries: Masteries) -> Self {
        MasteryKind::ALL
            .into_iter()
            .map(|kind| (kind, masteries.level(kind)))
            .collect()
    }
}

/// Resource whose accrual a run reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardKind {
    /// Coins.
    #[default]
    Coins,
    /// Elite cells.
    Cells,
    /// Reroll shards.
    Rerolls,
    /// Module shards.
    Modules,
}

impl RewardKind {
    /// Every reward kind.
    pub const ALL: [Self; 4] = [Self::Coins, Self::Cells, Self::Rerolls, Self::Modules];

    /// Kebab-case identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::Cells => "cells",
            Self::Rerolls => "rerolls",
            Self::Modules => "modules",
        }
    }

    /// Human readable axis label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Coins => "Coins",
            Self::Cells => "Elite cells",
            Self::Rerolls => "Reroll shards",
            Self::Modules => "Module shards",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RewardKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| ConfigError::UnknownRewardKind(value.to_owned()))
    }
}

/// Upgrade track that free upgrades apply to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeTrack {
    /// Attack upgrades.
    Attack,
    /// Defense upgrades.
    Defense,
    /// Utility upgrades.
    Utility,
}

/// Enemy stat that enemy level skips apply to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyStat {
    /// Enemy health scaling.
    Health,
    /// Enemy attack scaling.
    Attack,
}

/// Enemy archetypes whose spawns are modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyKind {
    /// Basic enemy.
    Basic,
    /// Fast enemy.
    Fast,
    /// Tank enemy.
    Tank,
    /// Ranged enemy.
    Ranged,
    /// Protector enemy.
    Protector,
    /// Boss.
    Boss,
    /// Scatter elite, splits on death.
    Scatter,
    /// Vampire elite.
    Vampire,
    /// Ray elite.
    Ray,
}

impl EnemyKind {
    /// Number of archetypes.
    pub const COUNT: usize = 9;

    /// Every archetype in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Basic,
        Self::Fast,
        Self::Tank,
        Self::Ranged,
        Self::Protector,
        Self::Boss,
        Self::Scatter,
        Self::Vampire,
        Self::Ray,
    ];

    /// Archetypes spawned by the regular spawn-rate model.
    pub const COMMON: [Self; 5] = [
        Self::Basic,
        Self::Fast,
        Self::Tank,
        Self::Ranged,
        Self::Protector,
    ];

    /// Elite archetypes.
    pub const ELITES: [Self; 3] = [Self::Scatter, Self::Vampire, Self::Ray];

    /// Position of the archetype within [`EnemyKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for scatter, vampire and ray.
    #[must_use]
    pub const fn is_elite(self) -> bool {
        matches!(self, Self::Scatter | Self::Vampire | Self::Ray)
    }
}

/// Expected number of enemies per archetype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyCounts([f64; EnemyKind::COUNT]);

impl EnemyCounts {
    /// Expected elites across all three elite archetypes.
    #[must_use]
    pub fn elite_total(&self) -> f64 {
        EnemyKind::ELITES.iter().map(|kind| self[*kind]).sum()
    }

    /// Iterates archetypes with their expected counts.
    pub fn iter(&self) -> impl Iterator<Item = (EnemyKind, f64)> + '_ {
        EnemyKind::ALL.into_iter().map(|kind| (kind, self[kind]))
    }
}

impl Index<EnemyKind> for EnemyCounts {
    type Output = f64;

    fn index(&self, kind: EnemyKind) -> &Self::Output {
        &self.0[kind.index()]
    }
}

impl IndexMut<EnemyKind> for EnemyCounts {
    fn index_mut(&mut self, kind: EnemyKind) -> &mut Self::Output {
        &mut self.0[kind.index()]
    }
}

impl AddAssign<&EnemyCounts> for EnemyCounts {
    fn add_assign(&mut self, other: &EnemyCounts) {
        for kind in EnemyKind::ALL {
            self[kind] += other[kind];
        }
    }
}

/// Expected-value snapshot of everything that can happen during one wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveEvents {
    /// Wave number, starting at 1.
    pub wave: u32,
    /// Probability that the wave is skipped.
    pub wave_skip_probability: f64,
    /// Probability that a recovery package drops.
    pub recovery_package_probability: f64,
    /// Free upgrade chance per upgrade track, passed through from the config.
    pub free_upgrade_rates: BTreeMap<UpgradeTrack, f64>,
    /// Enemy level skip chance per stat, passed through from the config.
    pub enemy_level_skip_rates: BTreeMap<EnemyStat, f64>,
    /// Expected spawns per archetype.
    pub expected_enemy_counts: EnemyCounts,
}

/// Running sums of [`WaveEvents`] fields across a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTotals {
    /// Expected number of skipped waves.
    pub skipped_waves: f64,
    /// Expected number of recovery packages.
    pub recovery_packages: f64,
    /// Expected free upgrades per track.
    pub free_upgrades: BTreeMap<UpgradeTrack, f64>,
    /// Expected enemy level skips per stat.
    pub enemy_level_skips: BTreeMap<EnemyStat, f64>,
    /// Expected spawns per archetype.
    pub enemies: EnemyCounts,
}

impl EventTotals {
    /// Folds one wave's events into the totals.
    pub fn record(&mut self, events: &WaveEvents) {
        self.skipped_waves += events.wave_skip_probability;
        self.recovery_packages += events.recovery_package_probability;
        for (track, rate) in &events.free_upgrade_rates {
            *self.free_upgrades.entry(*track).or_default() += rate;
        }
        for (stat, rate) in &events.enemy_level_skip_rates {
            *self.enemy_level_skips.entry(*stat).or_default() += rate;
        }
        self.enemies += &events.expected_enemy_counts;
    }
}

/// Amounts of every tracked resource.
///
/// Used both as a per-wave delta and as a cumulative total; arithmetic is
/// elementwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Coins.
    pub coins: f64,
    /// Elite cells.
    pub elite_cells: f64,
    /// Reroll shards.
    pub reroll_shards: f64,
    /// Module shards.
    pub module_shards: f64,
}

impl Rewards {
    /// No rewards.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a reward vector.
    #[must_use]
    pub const fn new(coins: f64, elite_cells: f64, reroll_shards: f64, module_shards: f64) -> Self {
        Self {
            coins,
            elite_cells,
            reroll_shards,
            module_shards,
        }
    }

    /// Amount of the provided reward kind.
    #[must_use]
    pub const fn get(&self, kind: RewardKind) -> f64 {
        match kind {
            RewardKind::Coins => self.coins,
            RewardKind::Cells => self.elite_cells,
            RewardKind::Rerolls => self.reroll_shards,
            RewardKind::Modules => self.module_shards,
        }
    }

    /// Applies `f` to each pair of matching fields.
    #[must_use]
    pub fn zip_with(self, other: Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self {
            coins: f(self.coins, other.coins),
            elite_cells: f(self.elite_cells, other.elite_cells),
            reroll_shards: f(self.reroll_shards, other.reroll_shards),
            module_shards: f(self.module_shards, other.module_shards),
        }
    }

    /// Applies `f` to every field.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        self.zip_with(Self::ZERO, |value, _| f(value))
    }

    /// Linear interpolation from `self` (at 0) to `other` (at 1).
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Add for Rewards {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl AddAssign for Rewards {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Rewards {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }
}

impl Mul<f64> for Rewards {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        self.map(|value| value * scale)
    }
}

impl Sum for Rewards {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// One point of a trajectory: totals accumulated up to and including `wave`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveResult {
    /// Wave number; 0 for the initial snapshot.
    pub wave: u32,
    /// In-game seconds elapsed when the wave ended.
    pub elapsed_time: f64,
    /// Running sum of wave events.
    pub cumulative_events: EventTotals,
    /// Running sum of rewards.
    pub cumulative_rewards: Rewards,
}

impl WaveResult {
    /// Snapshot taken before the first wave.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            wave: 0,
            elapsed_time: 0.0,
            cumulative_events: EventTotals::default(),
            cumulative_rewards: Rewards::ZERO,
        }
    }
}

/// Ordered snapshots produced by one run.
///
/// Non-empty, waves strictly increasing, elapsed time finite and
/// non-decreasing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WaveResult>", into = "Vec<WaveResult>")]
pub struct Trajectory {
    snapshots: Vec<WaveResult>,
}

impl Trajectory {
    /// Validates and wraps the provided snapshots.
    pub fn new(snapshots: Vec<WaveResult>) -> Result<Self, TrajectoryError> {
        let first = snapshots.first().ok_or(TrajectoryError::Empty)?;
        if !first.elapsed_time.is_finite() {
            return Err(TrajectoryError::TimeOrder {
                wave: first.wave,
                previous: 0.0,
                elapsed_time: first.elapsed_time,
            });
        }

        for pair in snapshots.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.wave <= previous.wave {
                return Err(TrajectoryError::WaveOrder {
                    previous: previous.wave,
                    wave: current.wave,
                });
            }
            if !current.elapsed_time.is_finite() || current.elapsed_time < previous.elapsed_time {
                return Err(TrajectoryError::TimeOrder {
                    wave: current.wave,
                    previous: previous.elapsed_time,
                    elapsed_time: current.elapsed_time,
                });
            }
        }

        Ok(Self { snapshots })
    }

    /// Every snapshot in wave order.
    #[must_use]
    pub fn snapshots(&self) -> &[WaveResult] {
        &self.snapshots
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` when the trajectory holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Earliest snapshot.
    #[must_use]
    pub fn first(&self) -> &WaveResult {
        &self.snapshots[0]
    }

    /// Latest snapshot.
    #[must_use]
    pub fn last(&self) -> &WaveResult {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Elapsed time of the latest snapshot.
    #[must_use]
    pub fn final_elapsed_time(&self) -> f64 {
        self.last().elapsed_time
    }

    /// Cumulative rewards of the latest snapshot.
    #[must_use]
    pub fn terminal_rewards(&self) -> Rewards {
        self.last().cumulative_rewards
    }

    /// Returns a trajectory with identical waves and times but rewards
    /// replaced by `f` applied to each snapshot.
    #[must_use]
    pub fn map_rewards(&self, mut f: impl FnMut(&WaveResult) -> Rewards) -> Self {
        let snapshots = self
            .snapshots
            .iter()
            .map(|snapshot| WaveResult {
                cumulative_rewards: f(snapshot),
                ..snapshot.clone()
            })
            .collect();
        Self { snapshots }
    }
}

impl TryFrom<Vec<WaveResult>> for Trajectory {
    type Error = TrajectoryError;

    fn try_from(snapshots: Vec<WaveResult>) -> Result<Self, Self::Error> {
        Self::new(snapshots)
    }
}

impl From<Trajectory> for Vec<WaveResult> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.snapshots
    }
}

/// A trajectory plus the scalar annotations attached by normalization passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Display name of the configuration.
    pub name: String,
    /// Mastery varied by the configuration, if any.
    pub mastery: Option<MasteryKind>,
    /// Reward kind the annotations refer to.
    pub reward_kind: RewardKind,
    /// Snapshots of the run.
    pub trajectory: Trajectory,
    /// Terminal amount of `reward_kind`.
    pub total: Option<f64>,
    /// Value relative to a reference run.
    pub relative: Option<f64>,
    /// Relative value per stone spent on `mastery`.
    pub roi: Option<f64>,
}

impl RunResult {
    /// Wraps a trajectory produced for `config`, without annotations.
    #[must_use]
    pub fn new(config: &Config, trajectory: Trajectory) -> Self {
        Self {
            name: config.name.clone(),
            mastery: config.mastery,
            reward_kind: config.reward_kind,
            trajectory,
            total: None,
            relative: None,
            roi: None,
        }
    }

    /// Terminal amount of the run's reward kind.
    #[must_use]
    pub fn terminal_value(&self) -> f64 {
        self.trajectory.terminal_rewards().get(self.reward_kind)
    }

    /// Returns a copy carrying a different trajectory and no annotations.
    #[must_use]
    pub fn with_trajectory(&self, trajectory: Trajectory) -> Self {
        Self {
            name: self.name.clone(),
            mastery: self.mastery,
            reward_kind: self.reward_kind,
            trajectory,
            total: None,
            relative: None,
            roi: None,
        }
    }
}
