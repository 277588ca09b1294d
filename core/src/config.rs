//! Scenario configuration and the factories that derive variants from a base.

use std::collections::{BTreeMap, BTreeSet};

use mastery_calc_tables as tables;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, EnemyStat, Fraction, Masteries, MasteryKind, MasteryLevel, RewardKind, Tier,
    UpgradeTrack,
};

/// Immutable description of one simulated scenario.
///
/// Every field is range-checked by its type, so a `Config` that exists is
/// valid. Scenario files may omit any field; omitted fields take the values of
/// [`Config::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name used by presentation adapters.
    pub name: String,
    /// Mastery this configuration varies, used for stone-cost normalization.
    pub mastery: Option<MasteryKind>,
    /// Game tier.
    pub tier: Tier,
    /// Last wave simulated.
    pub max_waves: u32,
    /// Average share of kills made by orbs.
    pub orb_hit_fraction: Fraction,
    /// Reward kind reported by the run annotations.
    pub reward_kind: RewardKind,
    /// Recovery package chance on waves that do not follow a boss.
    pub recovery_package_base_chance: Fraction,
    /// Free upgrade chance per track, passed through to wave events.
    pub free_upgrade_chances: BTreeMap<UpgradeTrack, Fraction>,
    /// Enemy level skip chance per stat, passed through to wave events.
    pub enemy_level_skip_chances: BTreeMap<EnemyStat, Fraction>,
    /// Mastery levels.
    pub masteries: Masteries,
    /// Waves a presentation adapter should plot.
    pub interesting_waves: BTreeSet<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: String::new(),
            mastery: None,
            tier: Tier::MIN,
            max_waves: 0,
            orb_hit_fraction: Fraction::ONE,
            reward_kind: RewardKind::Coins,
            recovery_package_base_chance: Fraction::ZERO,
            free_upgrade_chances: BTreeMap::new(),
            enemy_level_skip_chances: BTreeMap::new(),
            masteries: Masteries::LOCKED,
            interesting_waves: tables::SPAWN_RATE_WAVES.into_iter().collect(),
        }
    }
}

impl Config {
    /// Returns a copy with a different display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a copy simulating a different tier.
    #[must_use]
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Returns a copy simulating up to a different wave.
    #[must_use]
    pub fn with_max_waves(mut self, max_waves: u32) -> Self {
        self.max_waves = max_waves;
        self
    }

    /// Returns a copy reporting a different reward kind.
    #[must_use]
    pub fn with_reward_kind(mut self, reward_kind: RewardKind) -> Self {
        self.reward_kind = reward_kind;
        self
    }

    /// Returns a copy with one mastery set to `level`.
    #[must_use]
    pub fn with_mastery_level(mut self, kind: MasteryKind, level: Option<MasteryLevel>) -> Self {
        self.masteries = self.masteries.with_level(kind, level);
        self
    }

    /// Level of the provided mastery, `None` when locked.
    #[must_use]
    pub fn level(&self, kind: MasteryKind) -> Option<MasteryLevel> {
        self.masteries.level(kind)
    }

    /// Short tags such as `Coin#3` for every unlocked mastery other than the
    /// one this configuration varies.
    #[must_use]
    pub fn mastery_tags(&self) -> Vec<String> {
        self.masteries
            .unlocked()
            .filter(|(kind, _)| Some(*kind) != self.mastery)
            .map(|(kind, level)| format!("{}#{level}", kind.display_name()))
            .collect()
    }

    fn widen_interesting_waves(&mut self, max_waves: u32) {
        let _ = self.interesting_waves.insert(max_waves);
        self.interesting_waves.extend((100..=max_waves).step_by(100));
    }
}

/// Parses a mastery level token: `locked` or a level number.
pub fn mastery_level(token: &str) -> Result<Option<MasteryLevel>, ConfigError> {
    if token == "locked" {
        return Ok(None);
    }
    let value: u8 = token
        .parse()
        .map_err(|_| ConfigError::InvalidMasteryLevel(token.to_owned()))?;
    MasteryLevel::new(value).map(Some)
}

/// Derives a configuration that runs `base` for `max_wave` waves.
#[must_use]
pub fn waves_config(base: &Config, max_wave: u32) -> Config {
    let mut config = base
        .clone()
        .with_name(format!("{max_wave} waves"))
        .with_max_waves(max_wave);
    config.widen_interesting_waves(max_wave);
    config
}

/// Derives a configuration that sets one mastery of `base` to `level` and tags
/// it for stone-cost normalization.
#[must_use]
pub fn mastery_config(base: &Config, kind: MasteryKind, level: Option<MasteryLevel>) -> Config {
    let name = match level {
        None => format!("{kind}: locked"),
        Some(level) => format!("{kind}: level {level}"),
    };
    let mut config = base
        .clone()
        .with_name(name)
        .with_mastery_level(kind, level);
    config.mastery = Some(kind);
    config.widen_interesting_waves(base.max_waves);

    match kind {
        MasteryKind::IntroSprint => {
            let waves = &mut config.interesting_waves;
            let _ = waves.insert(1);
            for length in std::iter::once(tables::DEFAULT_INTRO_LENGTH)
                .chain(tables::INTRO_SPRINT_MASTERY_TABLE)
            {
                waves.extend((10..=length).step_by(10));
                let _ = waves.insert(length + 1);
            }
        }
        MasteryKind::WaveAccelerator => {
            for row in &tables::WAVE_ACCELERATOR_MASTERY_TABLE {
                config.interesting_waves.extend(row.iter().copied());
            }
        }
        _ => {}
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: u8) -> Option<MasteryLevel> {
        MasteryLevel::new(value).ok()
    }

    #[test]
    fn mastery_level_tokens() {
        assert_eq!(mastery_level("locked"), Ok(None));
        assert_eq!(mastery_level("0"), Ok(level(0)));
        assert_eq!(mastery_level("9"), Ok(level(9)));
        assert_eq!(
            mastery_level("10"),
            Err(ConfigError::MasteryLevelOutOfRange { value: 10 })
        );
        assert_eq!(
            mastery_level("max"),
            Err(ConfigError::InvalidMasteryLevel("max".to_owned()))
        );
    }

    #[test]
    fn waves_config_names_and_widens() {
        let config = waves_config(&Config::default(), 350);
        assert_eq!(config.name, "350 waves");
        assert_eq!(config.max_waves, 350);
        for wave in [100, 200, 300, 350] {
            assert!(config.interesting_waves.contains(&wave));
        }
    }

    #[test]
    fn mastery_config_tags_the_mastery() {
        let base = Config::default().with_max_waves(500);
        let config = mastery_config(&base, MasteryKind::Coin, level(4));
        assert_eq!(config.name, "coin: level 4");
        assert_eq!(config.mastery, Some(MasteryKind::Coin));
        assert_eq!(config.level(MasteryKind::Coin), level(4));
        assert!(config.interesting_waves.contains(&500));

        let locked = mastery_config(&base, MasteryKind::Coin, None);
        assert_eq!(locked.name, "coin: locked");
        assert_eq!(locked.level(MasteryKind::Coin), None);
    }

    #[test]
    fn intro_sprint_config_marks_intro_boundaries() {
        let config = mastery_config(&Config::default(), MasteryKind::IntroSprint, level(0));
        for wave in [1, 10, 100, 101, 180, 181, 1800, 1801] {
            assert!(config.interesting_waves.contains(&wave), "missing {wave}");
        }
    }

    #[test]
    fn accelerator_config_marks_accelerated_thresholds() {
        let config = mastery_config(&Config::default(), MasteryKind::WaveAccelerator, level(9));
        assert!(config.interesting_waves.contains(&3250));
        assert!(config.interesting_waves.contains(&5909));
    }

    #[test]
    fn mastery_tags_skip_the_varied_mastery() {
        let base = Config::default()
            .with_mastery_level(MasteryKind::Coin, level(3))
            .with_mastery_level(MasteryKind::WaveSkip, level(0));
        let config = mastery_config(&base, MasteryKind::Coin, level(5));
        assert_eq!(config.mastery_tags(), vec!["WS#0".to_owned()]);
    }
}
