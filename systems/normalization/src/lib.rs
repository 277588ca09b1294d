#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-normalization layer comparing runs on a shared elapsed-time axis.
//!
//! Runs of different configurations finish at different times, so every
//! comparison resamples trajectories by elapsed time instead of by wave.
//! Every operation returns new [`RunResult`] values and leaves its inputs
//! untouched.

use mastery_calc_core::{Rewards, RunResult, Trajectory, TrajectoryError, WaveResult};
use thiserror::Error;

/// Errors raised by multi-run normalization passes.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NormalizationError {
    /// The pass needs at least one run to derive its reference.
    #[error("normalization requires at least one run")]
    EmptyRuns,
    /// A derived trajectory violated its ordering invariants.
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

/// Cumulative rewards of `trajectory` at elapsed time `t`.
///
/// Times before the first snapshot clamp to the first snapshot and times at or
/// after the last clamp to the last. In between, rewards are interpolated
/// linearly. When several snapshots share an elapsed time, the latest of them
/// is used.
///
/// # Panics
///
/// Panics when an internal bracket has zero width, which the lookup never
/// selects for a valid trajectory.
#[must_use]
pub fn value_at(trajectory: &Trajectory, t: f64) -> Rewards {
    let snapshots = trajectory.snapshots();
    let upper = snapshots.partition_point(|snapshot| snapshot.elapsed_time <= t);
    if upper == 0 {
        return trajectory.first().cumulative_rewards;
    }
    if upper == snapshots.len() {
        return trajectory.last().cumulative_rewards;
    }

    let (lo, hi) = (&snapshots[upper - 1], &snapshots[upper]);
    let width = hi.elapsed_time - lo.elapsed_time;
    assert!(width > 0.0, "zero-width interpolation bracket at t = {t}");
    lo.cumulative_rewards
        .lerp(hi.cumulative_rewards, (t - lo.elapsed_time) / width)
}

/// Baseline rewards matching `snapshot`.
///
/// The baseline's own snapshot is used when it has one for the same wave at
/// the same time, so a run compared against itself is exact even where several
/// waves share an elapsed time.
fn baseline_at(baseline: &Trajectory, snapshot: &WaveResult) -> Rewards {
    let snapshots = baseline.snapshots();
    match snapshots.binary_search_by_key(&snapshot.wave, |candidate| candidate.wave) {
        Ok(index) if snapshots[index].elapsed_time == snapshot.elapsed_time => {
            snapshots[index].cumulative_rewards
        }
        _ => value_at(baseline, snapshot.elapsed_time),
    }
}

/// `value / reference - 1`, or 0 when the reference is 0.
#[must_use]
pub fn relative_change(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        value / reference - 1.0
    }
}

fn truncate(trajectory: &Trajectory, domain: f64) -> Result<Trajectory, TrajectoryError> {
    let snapshots = trajectory.snapshots();
    let kept = snapshots.partition_point(|snapshot| snapshot.elapsed_time <= domain);
    let mut truncated = snapshots[..kept].to_vec();

    let reaches_domain = truncated
        .last()
        .is_some_and(|snapshot| snapshot.elapsed_time >= domain);
    if !reaches_domain {
        if let Some(next) = snapshots.get(kept) {
            let cumulative_events = truncated
                .last()
                .map(|snapshot| snapshot.cumulative_events.clone())
                .unwrap_or_default();
            truncated.push(WaveResult {
                wave: next.wave,
                elapsed_time: domain,
                cumulative_events,
                cumulative_rewards: value_at(trajectory, domain),
            });
        }
    }
    Trajectory::new(truncated)
}

/// Cuts every run at the earliest final elapsed time across `runs`.
///
/// Runs that reach that time between two snapshots end with a synthetic
/// snapshot for the wave in progress, interpolated at exactly that time. All
/// returned runs therefore end at the same elapsed time.
pub fn truncate_to_shortest(runs: &[RunResult]) -> Result<Vec<RunResult>, NormalizationError> {
    let domain = runs
        .iter()
        .map(|run| run.trajectory.final_elapsed_time())
        .reduce(f64::min)
        .ok_or(NormalizationError::EmptyRuns)?;
    log::debug!("truncating {} runs to {domain:.0}s", runs.len());

    runs.iter()
        .map(|run| {
            let trajectory = truncate(&run.trajectory, domain)?;
            Ok(RunResult {
                total: run.total,
                relative: run.relative,
                roi: run.roi,
                ..run.with_trajectory(trajectory)
            })
        })
        .collect()
}

fn annotate_relative(run: &RunResult, reference: f64) -> RunResult {
    let value = run.terminal_value();
    RunResult {
        total: Some(value),
        relative: Some(relative_change(value, reference)),
        roi: None,
        ..run.clone()
    }
}

/// Annotates every run with its terminal value relative to the smallest
/// terminal value across `runs`.
pub fn relative_to_minimum(runs: &[RunResult]) -> Result<Vec<RunResult>, NormalizationError> {
    let reference = runs
        .iter()
        .map(RunResult::terminal_value)
        .reduce(f64::min)
        .ok_or(NormalizationError::EmptyRuns)?;
    log::debug!("relative reference is {reference}");
    Ok(runs
        .iter()
        .map(|run| annotate_relative(run, reference))
        .collect())
}

/// Annotates every run with its terminal value relative to `baseline`'s.
#[must_use]
pub fn relative_to_baseline(runs: &[RunResult], baseline: &RunResult) -> Vec<RunResult> {
    let reference = baseline.terminal_value();
    runs.iter()
        .map(|run| annotate_relative(run, reference))
        .collect()
}

/// Replaces every snapshot's rewards by their excess over `baseline` at the
/// same elapsed time.
#[must_use]
pub fn difference_from_baseline(runs: &[RunResult], baseline: &RunResult) -> Vec<RunResult> {
    runs.iter()
        .map(|run| {
            let trajectory = run.trajectory.map_rewards(|snapshot| {
                snapshot.cumulative_rewards - baseline_at(&baseline.trajectory, snapshot)
            });
            let difference = run.with_trajectory(trajectory);
            RunResult {
                total: Some(difference.terminal_value()),
                ..difference
            }
        })
        .collect()
}

/// Replaces every snapshot's rewards by their relative change against
/// `baseline` at the same elapsed time, field by field.
///
/// The run's `relative` annotation becomes the final ratio of its reward kind.
#[must_use]
pub fn normalize_vs_baseline(runs: &[RunResult], baseline: &RunResult) -> Vec<RunResult> {
    runs.iter()
        .map(|run| {
            let trajectory = run.trajectory.map_rewards(|snapshot| {
                snapshot
                    .cumulative_rewards
                    .zip_with(baseline_at(&baseline.trajectory, snapshot), relative_change)
            });
            let normalized = run.with_trajectory(trajectory);
            RunResult {
                total: Some(run.terminal_value()),
                relative: Some(normalized.terminal_value()),
                ..normalized
            }
        })
        .collect()
}

/// Annotates runs tagged with a mastery with `relative / stone cost`.
///
/// Runs without a mastery tag or without a `relative` annotation are returned
/// unchanged.
#[must_use]
pub fn annotate_roi(runs: &[RunResult]) -> Vec<RunResult> {
    runs.iter()
        .map(|run| match (run.mastery, run.relative) {
            (Some(mastery), Some(relative)) => RunResult {
                roi: Some(relative / mastery.stone_cost()),
                ..run.clone()
            },
            _ => run.clone(),
        })
        .collect()
}

/// Divides every ratio in the runs' trajectories by the stone cost of their
/// mastery.
///
/// Runs without a mastery tag have no cost to normalize against; their
/// rewards are zeroed and they carry no `roi`.
#[must_use]
pub fn normalize_vs_stone_cost(runs: &[RunResult]) -> Vec<RunResult> {
    runs.iter()
        .map(|run| match run.mastery {
            Some(mastery) => {
                let cost = mastery.stone_cost();
                let trajectory = run
                    .trajectory
                    .map_rewards(|snapshot| snapshot.cumulative_rewards.map(|value| value / cost));
                RunResult {
                    total: run.total,
                    relative: run.relative,
                    roi: run.relative.map(|relative| relative / cost),
                    ..run.with_trajectory(trajectory)
                }
            }
            None => RunResult {
                total: run.total,
                relative: run.relative,
                ..run.with_trajectory(run.trajectory.map_rewards(|_| Rewards::ZERO))
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastery_calc_core::EventTotals;

    fn snapshot(wave: u32, elapsed_time: f64, coins: f64) -> WaveResult {
        WaveResult {
            wave,
            elapsed_time,
            cumulative_events: EventTotals::default(),
            cumulative_rewards: Rewards::new(coins, 0.0, 0.0, 0.0),
        }
    }

    fn trajectory(points: &[(u32, f64, f64)]) -> Trajectory {
        Trajectory::new(
            points
                .iter()
                .map(|(wave, time, coins)| snapshot(*wave, *time, *coins))
                .collect(),
        )
        .expect("valid trajectory")
    }

    #[test]
    fn value_at_clamps_and_interpolates() {
        let trajectory = trajectory(&[(0, 0.0, 0.0), (1, 10.0, 100.0), (2, 30.0, 300.0)]);
        assert_eq!(value_at(&trajectory, -5.0).coins, 0.0);
        assert_eq!(value_at(&trajectory, 0.0).coins, 0.0);
        assert_eq!(value_at(&trajectory, 5.0).coins, 50.0);
        assert_eq!(value_at(&trajectory, 20.0).coins, 200.0);
        assert_eq!(value_at(&trajectory, 30.0).coins, 300.0);
        assert_eq!(value_at(&trajectory, 1e9).coins, 300.0);
    }

    #[test]
    fn duplicate_times_resolve_to_latest_snapshot() {
        let trajectory = trajectory(&[
            (0, 0.0, 0.0),
            (1, 10.0, 10.0),
            (2, 10.0, 12.0),
            (3, 10.0, 14.0),
            (4, 20.0, 24.0),
        ]);
        assert_eq!(value_at(&trajectory, 10.0).coins, 14.0);
        assert_eq!(value_at(&trajectory, 15.0).coins, 19.0);
        assert_eq!(value_at(&trajectory, 5.0).coins, 5.0);
    }

    #[test]
    fn baseline_lookup_prefers_matching_wave() {
        let trajectory = trajectory(&[(0, 0.0, 0.0), (1, 10.0, 10.0), (2, 10.0, 12.0)]);
        let first_duplicate = &trajectory.snapshots()[1];
        assert_eq!(baseline_at(&trajectory, first_duplicate).coins, 10.0);
        assert_eq!(value_at(&trajectory, 10.0).coins, 12.0);
    }

    #[test]
    fn relative_change_is_neutral_for_zero_reference() {
        assert_eq!(relative_change(5.0, 0.0), 0.0);
        assert_eq!(relative_change(15.0, 10.0), 0.5);
    }

    #[test]
    fn truncation_appends_interpolated_terminal_snapshot() {
        let long = trajectory(&[(0, 0.0, 0.0), (1, 10.0, 100.0), (2, 20.0, 200.0)]);
        let truncated = truncate(&long, 15.0).expect("valid truncation");
        let last = truncated.last();
        assert_eq!(truncated.len(), 3);
        assert_eq!(last.wave, 2);
        assert_eq!(last.elapsed_time, 15.0);
        assert_eq!(last.cumulative_rewards.coins, 150.0);
    }

    #[test]
    fn truncation_keeps_exact_domain_snapshot() {
        let long = trajectory(&[(0, 0.0, 0.0), (1, 10.0, 100.0), (2, 20.0, 200.0)]);
        let truncated = truncate(&long, 10.0).expect("valid truncation");
        assert_eq!(truncated.len(), 2);
        assert_eq!(truncated.last().wave, 1);
    }

    #[test]
    fn empty_runs_are_rejected() {
        assert_eq!(
            truncate_to_shortest(&[]).unwrap_err(),
            NormalizationError::EmptyRuns
        );
        assert_eq!(
            relative_to_minimum(&[]).unwrap_err(),
            NormalizationError::EmptyRuns
        );
    }
}
