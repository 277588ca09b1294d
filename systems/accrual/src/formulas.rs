//! Per-wave reward formulas.
//!
//! Every formula receives the configuration, the wave's expected events and
//! the rewards granted by the previous wave. A skipped wave does not produce
//! fresh rewards; it carries the previous wave's reward forward instead, so
//! each formula blends the fresh value with the carried value by the wave's
//! skip probability.

use mastery_calc_core::{Config, EnemyKind, MasteryKind, Rewards, WaveEvents};
use mastery_calc_tables as tables;

/// Blends the reward of a played wave with the reward of a skipped wave.
#[must_use]
pub fn wave_skip_bonus(events: &WaveEvents, value_if_no_skip: f64, value_if_skip: f64) -> f64 {
    let skip = events.wave_skip_probability;
    (1.0 - skip) * value_if_no_skip + skip * value_if_skip
}

fn base_coin_drop(kind: EnemyKind) -> f64 {
    match kind {
        EnemyKind::Basic => tables::BASIC_COIN_DROP,
        EnemyKind::Fast => tables::FAST_COIN_DROP,
        EnemyKind::Tank => tables::TANK_COIN_DROP,
        EnemyKind::Ranged => tables::RANGED_COIN_DROP,
        EnemyKind::Protector => tables::PROTECTOR_COIN_DROP,
        EnemyKind::Boss => tables::BOSS_COIN_DROP,
        EnemyKind::Scatter => tables::SCATTER_COIN_DROP,
        EnemyKind::Vampire => tables::VAMPIRE_COIN_DROP,
        EnemyKind::Ray => tables::RAY_COIN_DROP,
    }
}

/// Coins dropped by one enemy of `kind`.
#[must_use]
pub fn coin_value(config: &Config, kind: EnemyKind) -> f64 {
    let mut value = base_coin_drop(kind)
        * tables::TIER_COIN_BONUS[config.tier.index()]
        * config.masteries.scalar(MasteryKind::Coin).unwrap_or(1.0);
    if kind == EnemyKind::Basic {
        value *= 1.0 + config.masteries.scalar(MasteryKind::CriticalCoin).unwrap_or(0.0);
    }
    if kind.is_elite() {
        value /= tables::BLACK_HOLE_COIN_BONUS;
    }
    value
}

/// Coin multiplier from extra orb, weighted by the share of orb kills.
#[must_use]
pub fn orb_multiplier(config: &Config) -> f64 {
    config
        .masteries
        .scalar(MasteryKind::ExtraOrb)
        .map_or(1.0, |bonus| {
            1.0 + (bonus - 1.0) * config.orb_hit_fraction.get()
        })
}

/// Coins earned during the wave.
///
/// Scatter children are assumed to die inside detection range: they add
/// `2 + 4 + 8 + 16` extra kills per scatter but only the original spawn is
/// hit by orbs.
#[must_use]
pub fn coins(config: &Config, events: &WaveEvents, previous: &Rewards) -> f64 {
    let counts = &events.expected_enemy_counts;
    let orb = orb_multiplier(config);

    let spawned: f64 = EnemyKind::ALL
        .iter()
        .map(|kind| coin_value(config, *kind) * counts[*kind] * orb)
        .sum();
    let scatter_split = coin_value(config, EnemyKind::Scatter)
        * counts[EnemyKind::Scatter]
        * tables::SCATTER_SPLIT_FACTOR;

    wave_skip_bonus(
        events,
        spawned + scatter_split,
        previous.coins * tables::WAVE_SKIP_COIN_BONUS,
    )
}

/// Elite cells earned during the wave. A split scatter counts once.
#[must_use]
pub fn cells(config: &Config, events: &WaveEvents, previous: &Rewards) -> f64 {
    let (min, max) = tables::ELITE_CELL_RANGE[config.tier.index()];
    let fresh = events.expected_enemy_counts.elite_total() * (min + max) / 2.0;
    wave_skip_bonus(events, fresh, previous.elite_cells)
}

/// Reroll shards earned during the wave.
///
/// Elites drop nothing on a skipped wave, so the cash term blends against 0.
#[must_use]
pub fn rerolls(config: &Config, events: &WaveEvents, _previous: &Rewards) -> f64 {
    let counts = &events.expected_enemy_counts;
    let reroll_value = tables::TIER_REROLL_VALUE[config.tier.index()];
    let boss = counts[EnemyKind::Boss] * tables::REROLL_SHARD_DROP_CHANCE * reroll_value;
    let cash = config
        .masteries
        .scalar(MasteryKind::Cash)
        .map_or(0.0, |rate| {
            let elite = counts.elite_total() * rate * reroll_value / 2.0;
            wave_skip_bonus(events, elite, 0.0)
        });
    boss + cash
}

/// Module shards earned during the wave.
#[must_use]
pub fn modules(config: &Config, events: &WaveEvents, _previous: &Rewards) -> f64 {
    let bosses = events.expected_enemy_counts[EnemyKind::Boss];
    let packaged = config
        .masteries
        .scalar(MasteryKind::RecoveryPackage)
        .map_or(0.0, |rate| {
            wave_skip_bonus(events, events.recovery_package_probability * rate, 0.0)
        });
    let common = bosses * tables::COMMON_MODULE_CHANCE + packaged;
    let rare = bosses * tables::RARE_MODULE_CHANCE;
    common * tables::COMMON_MODULE_SHARD_VALUE + rare * tables::RARE_MODULE_SHARD_VALUE
}

/// Every reward earned during the wave.
#[must_use]
pub fn wave_rewards(config: &Config, events: &WaveEvents, previous: &Rewards) -> Rewards {
    Rewards::new(
        coins(config, events, previous),
        cells(config, events, previous),
        rerolls(config, events, previous),
        modules(config, events, previous),
    )
}
