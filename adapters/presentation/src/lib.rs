#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plot-ready series derived from simulated runs.
//!
//! This crate only shapes data. Axis scaling, cropping and colours belong to
//! whichever [`PlotSink`] receives the finished [`Plot`].

use std::{collections::BTreeSet, io::Write};

use anyhow::{Context, Result as AnyResult};
use mastery_calc_core::{MasteryKind, RewardKind, RunResult};
use mastery_calc_tables as tables;
use serde::{Deserialize, Serialize};

/// Label of the horizontal axis of every plot.
pub const ELAPSED_HOURS_LABEL: &str = "Elapsed time (h)";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Converts simulated seconds to elapsed hours at the game's speed-up.
#[must_use]
pub fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_PER_HOUR / tables::GAME_SPEED
}

/// One line of a plot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotLine {
    /// Legend name.
    pub name: String,
    /// Mastery varied by the run behind this line.
    pub mastery: Option<MasteryKind>,
    /// Elapsed hours.
    pub xs: Vec<f64>,
    /// Reward values.
    pub ys: Vec<f64>,
    /// Relative change against the comparison reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<f64>,
    /// Relative change per stone spent on the mastery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
}

impl PlotLine {
    /// Point with the largest value, the earliest one on ties.
    #[must_use]
    pub fn max(&self) -> Option<(f64, f64)> {
        self.points()
            .reduce(|best, point| if point.1 > best.1 { point } else { best })
    }

    /// Final point of the line.
    #[must_use]
    pub fn last(&self) -> Option<(f64, f64)> {
        self.points().last()
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// A complete figure handed to a [`PlotSink`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Figure title.
    pub title: String,
    /// Horizontal axis label.
    pub xlabel: String,
    /// Vertical axis label.
    pub ylabel: String,
    /// Lower bound of the vertical axis, renderer default when absent.
    pub bottom: Option<f64>,
    /// Lines in legend order.
    pub lines: Vec<PlotLine>,
}

impl Plot {
    /// Creates an empty plot of `reward_kind` over elapsed hours.
    #[must_use]
    pub fn new(title: impl Into<String>, reward_kind: RewardKind) -> Self {
        Self {
            title: title.into(),
            xlabel: ELAPSED_HOURS_LABEL.to_owned(),
            ylabel: reward_kind.label().to_owned(),
            bottom: None,
            lines: Vec::new(),
        }
    }

    /// Legend entries of every line.
    #[must_use]
    pub fn legend(&self) -> Vec<String> {
        self.lines.iter().map(legend_label).collect()
    }
}

/// Samples `run` at the waves in `interesting_waves`.
///
/// The run's reward kind selects the plotted value; snapshots for waves
/// outside the set are dropped.
#[must_use]
pub fn plot_line(run: &RunResult, interesting_waves: &BTreeSet<u32>) -> PlotLine {
    let (xs, ys) = run
        .trajectory
        .snapshots()
        .iter()
        .filter(|snapshot| interesting_waves.contains(&snapshot.wave))
        .map(|snapshot| {
            (
                seconds_to_hours(snapshot.elapsed_time),
                snapshot.cumulative_rewards.get(run.reward_kind),
            )
        })
        .unzip();

    PlotLine {
        name: run.name.clone(),
        mastery: run.mastery,
        xs,
        ys,
        relative: run.relative,
        roi: run.roi,
    }
}

/// Legend entry: the line name followed by its annotations.
#[must_use]
pub fn legend_label(line: &PlotLine) -> String {
    let mut label = line.name.clone();
    if let Some(relative) = line.relative {
        label.push_str(&format!("\n({:+.2}%)", relative * 100.0));
    }
    if let Some(roi) = line.roi {
        label.push_str(&format!("\n[{:.5}%/stone]", roi * 100.0));
    }
    label
}

/// Consumer of finished plots.
pub trait PlotSink {
    /// Presents `plot`.
    fn render(&mut self, plot: &Plot) -> AnyResult<()>;
}

/// Writes plots as pretty-printed JSON documents.
#[derive(Debug)]
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlotSink for JsonSink<W> {
    fn render(&mut self, plot: &Plot) -> AnyResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, plot)
            .with_context(|| format!("failed to serialize plot '{}'", plot.title))?;
        writeln!(self.writer).context("failed to terminate plot document")?;
        self.writer.flush().context("failed to flush plot document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastery_calc_core::Config;
    use mastery_calc_system_accrual::simulate;

    fn line(ys: &[f64]) -> PlotLine {
        PlotLine {
            name: "line".to_owned(),
            xs: (0..ys.len()).map(|x| x as f64).collect(),
            ys: ys.to_vec(),
            ..PlotLine::default()
        }
    }

    #[test]
    fn max_prefers_earliest_peak() {
        let line = line(&[1.0, 3.0, 2.0, 3.0]);
        assert_eq!(line.max(), Some((1.0, 3.0)));
        assert_eq!(line.last(), Some((3.0, 3.0)));
        assert_eq!(PlotLine::default().max(), None);
    }

    #[test]
    fn plot_line_keeps_interesting_waves_only() {
        let config = Config::default().with_max_waves(120);
        let run = simulate(&config);
        let waves: BTreeSet<u32> = [1, 10, 100, 120, 500].into_iter().collect();

        let line = plot_line(&run, &waves);
        assert_eq!(line.xs.len(), 4);
        assert_eq!(line.xs[0], seconds_to_hours(31.0));
        assert_eq!(line.xs[1], seconds_to_hours(62.0));
        assert_eq!(line.ys[0], 0.0);
        assert_eq!(line.ys[3], run.terminal_value());
        assert_eq!(line.name, run.name);
    }

    #[test]
    fn hours_account_for_game_speed() {
        assert_eq!(seconds_to_hours(3600.0 * tables::GAME_SPEED), 1.0);
    }

    #[test]
    fn legend_shows_present_annotations() {
        let mut line = line(&[1.0]);
        assert_eq!(legend_label(&line), "line");

        line.relative = Some(0.1234);
        line.roi = Some(0.1234 / 1250.0);
        assert_eq!(legend_label(&line), "line\n(+12.34%)\n[0.00987%/stone]");

        line.roi = None;
        line.relative = Some(-0.05);
        assert_eq!(legend_label(&line), "line\n(-5.00%)");
    }

    #[test]
    fn json_sink_writes_plot_document() {
        let mut plot = Plot::new("Coins over time", RewardKind::Coins);
        plot.lines.push(line(&[1.0, 2.0]));

        let mut sink = JsonSink::new(Vec::new());
        sink.render(&plot).expect("render into memory");
        let written = sink.into_inner();

        let parsed: Plot = serde_json::from_slice(&written).expect("valid plot JSON");
        assert_eq!(parsed, plot);
        assert_eq!(parsed.xlabel, ELAPSED_HOURS_LABEL);
        assert_eq!(plot.legend(), vec!["line".to_owned()]);
    }
}
