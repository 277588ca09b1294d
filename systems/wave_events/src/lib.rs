#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Expected-value model of what happens during a single wave.

use mastery_calc_core::{Config, EnemyCounts, EnemyKind, MasteryKind, Tier, WaveEvents};
use mastery_calc_tables as tables;

/// Computes the expected events of `wave` for the provided configuration.
///
/// # Panics
///
/// Panics when `wave` is 0; the model starts at wave 1.
#[must_use]
pub fn compute_wave_events(config: &Config, wave: u32) -> WaveEvents {
    assert!(wave >= 1, "wave events start at wave 1");

    let spawn_index = spawn_rate_index(config, wave);
    let spawned = tables::WAVE_DURATION
        * tables::SPAWN_MULTIPLIER
        * tables::SPAWN_RATE_SEQUENCE[spawn_index];

    let mut counts = EnemyCounts::default();
    for kind in EnemyKind::COMMON {
        counts[kind] = spawned * spawn_chance(kind, spawn_index);
    }
    counts[EnemyKind::Boss] = if is_boss_wave(config.tier, wave) {
        1.0
    } else {
        0.0
    };
    let elites = expected_elites(config, wave);
    for kind in EnemyKind::ELITES {
        counts[kind] = elites / EnemyKind::ELITES.len() as f64;
    }

    WaveEvents {
        wave,
        wave_skip_probability: wave_skip_probability(config),
        recovery_package_probability: recovery_package_probability(config, wave),
        free_upgrade_rates: config
            .free_upgrade_chances
            .iter()
            .map(|(track, chance)| (*track, chance.get()))
            .collect(),
        enemy_level_skip_rates: config
            .enemy_level_skip_chances
            .iter()
            .map(|(stat, chance)| (*stat, chance.get()))
            .collect(),
        expected_enemy_counts: counts,
    }
}

/// Minimum-wave thresholds of every spawn-rate index.
///
/// Wave accelerator replaces the default row with its level's row.
#[must_use]
pub fn spawn_rate_thresholds(config: &Config) -> &'static [u32; tables::SPAWN_STEP_COUNT] {
    match config.level(MasteryKind::WaveAccelerator) {
        None => &tables::SPAWN_RATE_WAVES,
        Some(level) => &tables::WAVE_ACCELERATOR_MASTERY_TABLE[level.index()],
    }
}

/// Largest spawn-rate index whose minimum wave has been reached.
///
/// # Panics
///
/// Panics when no threshold is reached, which only happens for wave 0.
#[must_use]
pub fn spawn_rate_index(config: &Config, wave: u32) -> usize {
    let reached = spawn_rate_thresholds(config).partition_point(|min_wave| *min_wave <= wave);
    assert!(
        (1..=tables::SPAWN_STEP_COUNT).contains(&reached),
        "invalid spawn rate index for wave {wave}"
    );
    reached - 1
}

fn spawn_chance(kind: EnemyKind, index: usize) -> f64 {
    match kind {
        EnemyKind::Basic => tables::basic_spawn_chance(index),
        EnemyKind::Fast => tables::FAST_SPAWN_CHANCE[index],
        EnemyKind::Tank => tables::TANK_SPAWN_CHANCE[index],
        EnemyKind::Ranged => tables::RANGED_SPAWN_CHANCE[index],
        EnemyKind::Protector => tables::PROTECTOR_SPAWN_CHANCE[index],
        EnemyKind::Boss | EnemyKind::Scatter | EnemyKind::Vampire | EnemyKind::Ray => 0.0,
    }
}

/// Step of an elite chance curve: the largest index past the sentinel whose
/// threshold has been reached, or 0 when none has.
fn elite_step(thresholds: &[u32; tables::ELITE_STEP_COUNT], wave: u32) -> usize {
    thresholds[1..].partition_point(|threshold| *threshold <= wave)
}

/// Expected number of elites spawned during `wave`.
#[must_use]
pub fn expected_elites(config: &Config, wave: u32) -> f64 {
    let tier = config.tier.index();
    let single =
        tables::ELITE_CHANCE_STEPS[elite_step(&tables::ELITE_SINGLE_THRESHOLDS[tier], wave)];
    let double =
        tables::DOUBLE_SPAWN_STEPS[elite_step(&tables::ELITE_DOUBLE_THRESHOLDS[tier], wave)];
    let balance = config
        .masteries
        .scalar(MasteryKind::EnemyBalance)
        .unwrap_or(0.0);
    single * (1.0 + double) * (1.0 + balance)
}

/// Waves between consecutive bosses at `tier`.
#[must_use]
pub fn boss_period(tier: Tier) -> u32 {
    tables::BOSS_PERIOD[tier.index()]
}

/// Returns `true` when a boss spawns during `wave`.
#[must_use]
pub fn is_boss_wave(tier: Tier, wave: u32) -> bool {
    wave % boss_period(tier) == 0
}

/// Recovery package chance: certain right after a boss wave.
#[must_use]
pub fn recovery_package_probability(config: &Config, wave: u32) -> f64 {
    if wave > 1 && is_boss_wave(config.tier, wave - 1) {
        1.0
    } else {
        config.recovery_package_base_chance.get()
    }
}

/// Probability that a wave is skipped.
///
/// A wave is skipped when the wave two back triggered a double skip, or the
/// wave one back triggered an ordinary skip that was not a double skip.
#[must_use]
pub fn wave_skip_probability(config: &Config) -> f64 {
    let double_skip = config
        .masteries
        .scalar(MasteryKind::WaveSkip)
        .map_or(0.0, |bonus| tables::WAVE_SKIP_CHANCE * bonus);
    double_skip + tables::WAVE_SKIP_CHANCE * (1.0 - double_skip)
}
