use mastery_calc_core::{Config, EnemyKind, MasteryKind, MasteryLevel, Rewards, Tier, WaveEvents};
use mastery_calc_system_accrual::{
    formulas, intro_length, simulate, simulate_run, simulate_trajectory,
};
use mastery_calc_system_wave_events::compute_wave_events;
use mastery_calc_tables as tables;
use proptest::prelude::*;

fn level(value: u8) -> Option<MasteryLevel> {
    Some(MasteryLevel::new(value).expect("valid level"))
}

fn tier(value: u8) -> Tier {
    Tier::new(value).expect("valid tier")
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn assert_rewards_close(actual: Rewards, expected: Rewards) {
    assert_close(actual.coins, expected.coins);
    assert_close(actual.elite_cells, expected.elite_cells);
    assert_close(actual.reroll_shards, expected.reroll_shards);
    assert_close(actual.module_shards, expected.module_shards);
}

#[test]
fn first_wave_rewards_match_closed_form() {
    let config = Config::default().with_max_waves(1);
    let events = WaveEvents {
        wave_skip_probability: 0.0,
        ..compute_wave_events(&config, 1)
    };
    let rewards = formulas::wave_rewards(&config, &events, &Rewards::ZERO);

    let spawned = tables::WAVE_DURATION * tables::SPAWN_MULTIPLIER * tables::SPAWN_RATE_SEQUENCE[0];
    let expected_coins = spawned * tables::basic_spawn_chance(0) * tables::BASIC_COIN_DROP
        + spawned * tables::FAST_SPAWN_CHANCE[0] * tables::FAST_COIN_DROP;

    assert_close(rewards.coins, expected_coins);
    assert_eq!(rewards.elite_cells, 0.0);
    assert_eq!(rewards.reroll_shards, 0.0);
    assert_eq!(rewards.module_shards, 0.0);
}

#[test]
fn trajectory_starts_at_origin_and_covers_every_wave() {
    let config = Config::default().with_max_waves(150);
    let trajectory = simulate_trajectory(&config);

    assert_eq!(trajectory.len(), 151);
    let first = trajectory.first();
    assert_eq!(first.wave, 0);
    assert_eq!(first.elapsed_time, 0.0);
    assert_eq!(first.cumulative_rewards, Rewards::ZERO);
    assert_eq!(trajectory.last().wave, 150);
}

#[test]
fn locked_tier_one_run_matches_reference() {
    let cases = [
        (12, 62.0, Rewards::ZERO),
        (99, 310.0, Rewards::ZERO),
        (100, 341.0, Rewards::new(4418.6192, 0.1, 1.0, 0.195)),
        (
            110,
            592.1,
            Rewards::new(49_180.148_352_109_514, 1.1, 2.0, 0.39),
        ),
    ];

    for (max_waves, elapsed_time, rewards) in cases {
        let config = Config::default().with_max_waves(max_waves);
        let trajectory = simulate_trajectory(&config);
        assert_close(trajectory.final_elapsed_time(), elapsed_time);
        assert_rewards_close(trajectory.terminal_rewards(), rewards);
    }
}

#[test]
fn skipped_intro_waves_cost_no_time() {
    let config = Config::default().with_max_waves(20);
    let times: Vec<f64> = simulate_run(&config)
        .map(|result| result.elapsed_time)
        .collect();

    assert_eq!(times[1], 31.0);
    assert!(times[2..10].iter().all(|time| *time == 31.0));
    assert_eq!(times[10], 62.0);
    assert_eq!(times[20], 93.0);
}

#[test]
fn intro_counts_skips_for_forced_waves_only() {
    let config = Config::default().with_max_waves(99);
    let trajectory = simulate_trajectory(&config);
    assert_eq!(trajectory.last().cumulative_events.skipped_waves, 89.0);
}

#[test]
fn intro_forces_boss_pattern_regardless_of_tier() {
    let config = Config::default().with_tier(tier(4)).with_max_waves(120);
    let snapshots = simulate_trajectory(&config).snapshots().to_vec();
    let deltas: Vec<(f64, f64)> = snapshots
        .windows(2)
        .map(|pair| {
            let (before, after) = (&pair[0].cumulative_events, &pair[1].cumulative_events);
            (
                after.enemies[EnemyKind::Boss] - before.enemies[EnemyKind::Boss],
                after.recovery_packages - before.recovery_packages,
            )
        })
        .collect();

    for wave in 1..=120usize {
        let (boss, recovery) = deltas[wave - 1];
        let boss_wave = if wave < 100 {
            wave == 1 || wave % 10 == 0
        } else {
            wave % 9 == 0
        };
        let after_boss = wave > 1 && deltas[wave - 2].0 == 1.0;
        assert_eq!(boss, f64::from(u8::from(boss_wave)), "boss at wave {wave}");
        assert_eq!(
            recovery,
            f64::from(u8::from(after_boss)),
            "recovery at wave {wave}"
        );
    }

    let totals = &snapshots[120].cumulative_events;
    assert_eq!(totals.enemies[EnemyKind::Boss], 12.0);
    assert_eq!(totals.recovery_packages, 12.0);
}

#[test]
fn intro_sprint_delays_coin_income() {
    let base = Config::default().with_max_waves(150);
    let sprinted = base
        .clone()
        .with_mastery_level(MasteryKind::IntroSprint, level(0));
    assert_eq!(intro_length(&sprinted), 180);

    assert!(simulate_trajectory(&base).terminal_rewards().coins > 0.0);
    assert_eq!(simulate_trajectory(&sprinted).terminal_rewards().coins, 0.0);
    assert!(
        simulate_trajectory(&sprinted).final_elapsed_time()
            < simulate_trajectory(&base).final_elapsed_time()
    );
}

#[test]
fn regular_waves_follow_previous_wave_recurrence() {
    let config = Config::default()
        .with_tier(tier(6))
        .with_max_waves(400)
        .with_mastery_level(MasteryKind::WaveSkip, level(5))
        .with_mastery_level(MasteryKind::Cash, level(3));
    let snapshots = simulate_trajectory(&config).snapshots().to_vec();

    for window in snapshots[101..].windows(3) {
        let previous = window[1].cumulative_rewards - window[0].cumulative_rewards;
        let current = window[2].cumulative_rewards - window[1].cumulative_rewards;
        let events = compute_wave_events(&config, window[2].wave);
        assert_rewards_close(current, formulas::wave_rewards(&config, &events, &previous));
    }
}

#[test]
fn wave_skip_mastery_trades_time_for_coins() {
    let base = Config::default().with_max_waves(600);
    let skipping = base
        .clone()
        .with_mastery_level(MasteryKind::WaveSkip, level(9));

    let plain = simulate_trajectory(&base);
    let skipped = simulate_trajectory(&skipping);
    assert!(skipped.final_elapsed_time() < plain.final_elapsed_time());
}

#[test]
fn coin_mastery_scales_regular_coins() {
    let base = Config::default().with_max_waves(300);
    let boosted = base.clone().with_mastery_level(MasteryKind::Coin, level(9));

    let plain = simulate_trajectory(&base).terminal_rewards().coins;
    let scaled = simulate_trajectory(&boosted).terminal_rewards().coins;
    assert_close(scaled, plain * 1.30);
}

#[test]
fn simulate_records_reward_total() {
    let config = Config::default()
        .with_max_waves(200)
        .with_reward_kind(mastery_calc_core::RewardKind::Cells);
    let result = simulate(&config);
    assert_eq!(result.total, Some(result.trajectory.terminal_rewards().elite_cells));
    assert!(result.total.unwrap_or_default() > 0.0);
}

#[test]
fn runs_are_restartable() {
    let config = Config::default().with_max_waves(120);
    let mut run = simulate_run(&config);
    let _ = run.by_ref().take(60).count();
    let resumed = run.clone();

    let rest: Vec<_> = run.collect();
    let replay: Vec<_> = resumed.collect();
    assert_eq!(rest, replay);
    assert_eq!(
        simulate_run(&config).collect::<Vec<_>>(),
        simulate_trajectory(&config).snapshots().to_vec()
    );
}

fn masteries() -> impl Strategy<Value = Vec<(MasteryKind, Option<MasteryLevel>)>> {
    proptest::collection::vec(
        (
            proptest::sample::select(MasteryKind::ALL.to_vec()),
            proptest::option::of((0u8..=9).prop_map(|value| {
                MasteryLevel::new(value).expect("generated level is valid")
            })),
        ),
        0..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn cumulative_values_never_decrease(
        tier_value in 1u8..=18,
        max_waves in 1u32..400,
        levels in masteries(),
    ) {
        let mut config = Config::default()
            .with_tier(tier(tier_value))
            .with_max_waves(max_waves);
        for (kind, level) in levels {
            config = config.with_mastery_level(kind, level);
        }

        let trajectory = simulate_trajectory(&config);
        prop_assert_eq!(trajectory.len() as u32, max_waves + 1);
        for pair in trajectory.snapshots().windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert_eq!(after.wave, before.wave + 1);
            prop_assert!(after.elapsed_time >= before.elapsed_time);
            let delta = after.cumulative_rewards - before.cumulative_rewards;
            prop_assert!(delta.coins >= 0.0);
            prop_assert!(delta.elite_cells >= 0.0);
            prop_assert!(delta.reroll_shards >= 0.0);
            prop_assert!(delta.module_shards >= 0.0);
        }
    }
}
