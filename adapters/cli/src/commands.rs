//! Scenario sets behind each subcommand.

use anyhow::Result;
use mastery_calc_core::{
    mastery_config, waves_config, Config, MasteryKind, MasteryLevel, RunResult,
};
use mastery_calc_presentation::{plot_line, Plot};
use mastery_calc_system_accrual::simulate;
use mastery_calc_system_normalization::{
    annotate_roi, normalize_vs_baseline, normalize_vs_stone_cost, relative_to_minimum,
    truncate_to_shortest,
};
use rayon::prelude::*;

/// Lower bound of relative plots, just below the baseline.
const RELATIVE_BOTTOM: f64 = -0.01;

/// How `compare` post-processes its runs.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CompareOptions {
    /// Plot ratios against the baseline instead of absolute rewards.
    pub(crate) relative: bool,
    /// Annotate (and, for relative plots, scale) gains per stone spent.
    pub(crate) roi: bool,
}

/// Simulates independent configurations in parallel, preserving order.
fn simulate_all(configs: &[Config]) -> Vec<RunResult> {
    configs.par_iter().map(simulate).collect()
}

fn baseline_config(base: &Config) -> Config {
    waves_config(base, base.max_waves).with_name("baseline")
}

fn description(mut parts: Vec<String>) -> String {
    parts.retain(|part| !part.is_empty());
    parts.join(", ")
}

fn reward_description(base: &Config, relative: bool) -> String {
    if relative {
        "Relative to baseline".to_owned()
    } else {
        format!("Absolute {}", base.reward_kind.label().to_lowercase())
    }
}

/// Builds a plot with one line per run, sampled at each configuration's
/// interesting waves plus the run's final wave.
fn plot_runs(title: String, base: &Config, configs: &[Config], runs: &[RunResult]) -> Plot {
    let mut plot = Plot::new(title, base.reward_kind);
    plot.lines = configs
        .iter()
        .zip(runs)
        .map(|(config, run)| {
            let mut waves = config.interesting_waves.clone();
            let _ = waves.insert(run.trajectory.last().wave);
            plot_line(run, &waves)
        })
        .collect();
    plot
}

/// One run per wave count, longest first.
pub(crate) fn waves(base: &Config, waves: &[u32]) -> Plot {
    let mut counts = waves.to_vec();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let configs: Vec<Config> = counts
        .iter()
        .map(|max_wave| waves_config(base, *max_wave))
        .collect();
    let runs = simulate_all(&configs);

    let listed: Vec<String> = waves.iter().map(ToString::to_string).collect();
    let mut parts = vec![format!("Simulating waves {}", listed.join(", "))];
    parts.extend(base.mastery_tags());
    plot_runs(description(parts), base, &configs, &runs)
}

/// Every mastery at `level` next to a baseline without it.
pub(crate) fn compare(
    base: &Config,
    level: Option<MasteryLevel>,
    options: CompareOptions,
) -> Result<Plot> {
    let mut configs = vec![baseline_config(base)];
    configs.extend(
        MasteryKind::ALL
            .iter()
            .map(|kind| mastery_config(base, *kind, level)),
    );
    let runs = truncate_to_shortest(&simulate_all(&configs))?;

    let mut runs = if options.relative {
        let baseline = runs[0].clone();
        normalize_vs_baseline(&runs, &baseline)
    } else {
        relative_to_minimum(&runs)?
    };
    if options.roi {
        runs = if options.relative {
            normalize_vs_stone_cost(&runs)
        } else {
            annotate_roi(&runs)
        };
    }

    let level_name = level.map_or_else(|| "locked".to_owned(), |level| level.to_string());
    let mut parts = vec![
        format!("Comparing masteries at level {level_name}"),
        reward_description(base, options.relative),
    ];
    if options.roi {
        parts.push("Per stone".to_owned());
    }
    parts.push(format!("For {} waves", base.max_waves));

    let mut plot = plot_runs(description(parts), base, &configs, &runs);
    if options.relative && !options.roi {
        plot.bottom = Some(RELATIVE_BOTTOM);
    }
    Ok(plot)
}

/// Every level of `kind`, including locked.
pub(crate) fn mastery(base: &Config, kind: MasteryKind, relative: bool) -> Result<Plot> {
    let configs: Vec<Config> = std::iter::once(None)
        .chain(MasteryLevel::all().map(Some))
        .map(|level| mastery_config(base, kind, level))
        .collect();
    let mut all = configs.clone();
    all.push(baseline_config(base));
    let mut runs = simulate_all(&all);
    let baseline = runs.pop().expect("baseline run is simulated last");
    let runs = truncate_to_shortest(&runs)?;

    let runs = if relative {
        normalize_vs_baseline(&runs, &baseline)
    } else {
        relative_to_minimum(&runs)?
    };

    let mut parts = vec![
        format!("Comparing {}# levels", kind.display_name()),
        reward_description(base, relative),
        format!("For {} waves", base.max_waves),
    ];
    parts.extend(configs[0].mastery_tags());

    let mut plot = plot_runs(description(parts), base, &configs, &runs);
    if relative {
        plot.bottom = Some(RELATIVE_BOTTOM);
    }
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(max_waves: u32) -> Config {
        Config::default().with_max_waves(max_waves)
    }

    #[test]
    fn waves_plot_longest_run_first() {
        let plot = waves(&base(300), &[150, 300]);
        assert_eq!(plot.lines.len(), 2);
        assert_eq!(plot.lines[0].name, "300 waves");
        assert_eq!(plot.lines[1].name, "150 waves");
        assert!(plot.title.starts_with("Simulating waves 150, 300"));
    }

    #[test]
    fn compare_lines_share_final_time() {
        let plot = compare(&base(400), MasteryLevel::new(3).ok(), CompareOptions::default())
            .expect("comparison runs");
        assert_eq!(plot.lines.len(), MasteryKind::COUNT + 1);
        assert_eq!(plot.lines[0].name, "baseline");

        let ends: Vec<f64> = plot
            .lines
            .iter()
            .filter_map(|line| line.last().map(|(x, _)| x))
            .collect();
        assert_eq!(ends.len(), plot.lines.len());
        assert!(ends.iter().all(|end| (end - ends[0]).abs() < 1e-9));
        assert!(plot.lines.iter().all(|line| line.relative.is_some()));
    }

    #[test]
    fn relative_comparison_pins_baseline_at_zero() {
        let options = CompareOptions {
            relative: true,
            roi: true,
        };
        let plot = compare(&base(300), MasteryLevel::new(9).ok(), options).expect("runs");
        assert!(plot.lines[0].ys.iter().all(|value| *value == 0.0));
        assert_eq!(plot.lines[0].roi, None);
        assert!(plot.lines[1..].iter().all(|line| line.roi.is_some()));
    }

    #[test]
    fn mastery_plot_covers_every_level() {
        let plot = mastery(&base(300), MasteryKind::Coin, true).expect("runs");
        assert_eq!(plot.lines.len(), 11);
        assert_eq!(plot.lines[0].name, "coin: locked");
        assert_eq!(plot.lines[0].relative, Some(0.0));
        let top = plot.lines[10].relative.expect("relative annotation");
        assert!((top - 0.30).abs() < 1e-9);
    }
}
