use std::collections::BTreeMap;

use mastery_calc_core::{
    Config, EnemyKind, EnemyStat, Fraction, MasteryKind, MasteryLevel, Tier, UpgradeTrack,
};
use mastery_calc_system_wave_events::{compute_wave_events, expected_elites, spawn_rate_index};
use mastery_calc_tables as tables;

fn level(value: u8) -> Option<MasteryLevel> {
    MasteryLevel::new(value).ok()
}

#[test]
fn locked_wave_skip_uses_base_chance_exactly() {
    let config = Config::default().with_max_waves(3000);
    for wave in 1..=3000 {
        let events = compute_wave_events(&config, wave);
        assert_eq!(events.wave_skip_probability, tables::WAVE_SKIP_CHANCE);
    }
}

#[test]
fn wave_skip_mastery_adds_double_skips() {
    let config = Config::default().with_mastery_level(MasteryKind::WaveSkip, level(9));
    let double = tables::WAVE_SKIP_CHANCE * 0.55;
    let expected = double + tables::WAVE_SKIP_CHANCE * (1.0 - double);

    let events = compute_wave_events(&config, 500);
    assert!((events.wave_skip_probability - expected).abs() < 1e-12);
    assert!(events.wave_skip_probability > tables::WAVE_SKIP_CHANCE);
}

#[test]
fn common_spawns_add_up_to_the_spawn_rate() {
    let config = Config::default();
    for wave in [1, 5, 99, 1000, 7000] {
        let events = compute_wave_events(&config, wave);
        let index = spawn_rate_index(&config, wave);
        let expected = tables::WAVE_DURATION
            * tables::SPAWN_MULTIPLIER
            * tables::SPAWN_RATE_SEQUENCE[index];
        let total: f64 = EnemyKind::COMMON
            .iter()
            .map(|kind| events.expected_enemy_counts[*kind])
            .sum();
        assert!((total - expected).abs() < 1e-9, "wave {wave}: {total} != {expected}");
        for (kind, count) in events.expected_enemy_counts.iter() {
            assert!(count >= 0.0, "{kind:?} negative at wave {wave}");
        }
    }
}

#[test]
fn elites_split_evenly_across_archetypes() {
    let config = Config::default().with_tier(Tier::new(9).expect("tier"));
    let events = compute_wave_events(&config, 2500);
    let counts = &events.expected_enemy_counts;

    assert!(counts.elite_total() > 0.0);
    assert_eq!(counts[EnemyKind::Scatter], counts[EnemyKind::Vampire]);
    assert_eq!(counts[EnemyKind::Vampire], counts[EnemyKind::Ray]);
    assert!((counts.elite_total() - expected_elites(&config, 2500)).abs() < 1e-12);
}

#[test]
fn no_elites_before_first_threshold() {
    let config = Config::default();
    assert_eq!(compute_wave_events(&config, 99).expected_enemy_counts.elite_total(), 0.0);
    assert!(compute_wave_events(&config, 100).expected_enemy_counts.elite_total() > 0.0);
}

#[test]
fn enemy_balance_raises_elite_spawns() {
    let base = Config::default().with_tier(Tier::new(5).expect("tier"));
    let balanced = base
        .clone()
        .with_mastery_level(MasteryKind::EnemyBalance, level(0));

    let without = expected_elites(&base, 1200);
    let with = expected_elites(&balanced, 1200);
    assert!((with - without * 1.05).abs() < 1e-12);
}

#[test]
fn higher_tiers_reach_elites_sooner() {
    let low = Config::default();
    let high = Config::default().with_tier(Tier::new(18).expect("tier"));
    assert!(expected_elites(&high, 400) > expected_elites(&low, 400));
}

#[test]
fn boss_presence_follows_tier_period() {
    let config = Config::default();
    let bosses: Vec<u32> = (1..=30)
        .filter(|wave| compute_wave_events(&config, *wave).expected_enemy_counts[EnemyKind::Boss] == 1.0)
        .collect();
    assert_eq!(bosses, vec![10, 20, 30]);
}

#[test]
fn pass_through_rates_are_copied() {
    let mut config = Config::default();
    config.free_upgrade_chances = BTreeMap::from([
        (UpgradeTrack::Defense, Fraction::new(0.3).expect("fraction")),
    ]);
    config.enemy_level_skip_chances = BTreeMap::from([
        (EnemyStat::Attack, Fraction::new(0.07).expect("fraction")),
    ]);
    config.recovery_package_base_chance = Fraction::new(0.4).expect("fraction");

    let events = compute_wave_events(&config, 42);
    assert_eq!(events.free_upgrade_rates[&UpgradeTrack::Defense], 0.3);
    assert_eq!(events.enemy_level_skip_rates[&EnemyStat::Attack], 0.07);
    assert_eq!(events.recovery_package_probability, 0.4);
    assert_eq!(compute_wave_events(&config, 41).recovery_package_probability, 1.0);
}

#[test]
#[should_panic(expected = "wave events start at wave 1")]
fn wave_zero_is_rejected() {
    let _ = compute_wave_events(&Config::default(), 0);
}
