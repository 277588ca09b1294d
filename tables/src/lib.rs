#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static lookup tables describing the game's spawn model, reward values and
//! mastery bonuses.
//!
//! Every table is plain data indexed by zero-based positions. Tier tables are
//! indexed by `tier - 1`, mastery tables by the mastery level (`0..=9`) and
//! spawn tables by the spawn-rate index selected from [`SPAWN_RATE_WAVES`].
//! Nothing in this crate performs lookups beyond constant access; consumers
//! own the selection logic.

/// Number of supported game tiers.
pub const TIER_COUNT: usize = 18;

/// Number of levels available to every mastery.
pub const MASTERY_LEVEL_COUNT: usize = 10;

/// Number of entries in the spawn-rate progression.
pub const SPAWN_STEP_COUNT: usize = 27;

/// Number of discrete steps in the elite spawn chance curves.
pub const ELITE_STEP_COUNT: usize = 11;

/// In-game seconds a wave spends spawning enemies.
pub const WAVE_DURATION: f64 = 26.0;

/// In-game seconds between the end of one wave and the start of the next.
pub const WAVE_COOLDOWN: f64 = 5.0;

/// Game speed multiplier used to convert in-game seconds to real time.
pub const GAME_SPEED: f64 = 6.25 * 0.8;

/// Scales `WAVE_DURATION * spawn_rate` into an expected spawn count.
pub const SPAWN_MULTIPLIER: f64 = 8.0;

/// Base chance that a wave is skipped.
pub const WAVE_SKIP_CHANCE: f64 = 0.19;

/// Multiplier applied to the carried-forward coin reward of a skipped wave.
pub const WAVE_SKIP_COIN_BONUS: f64 = 1.10;

/// Intro phase length when intro sprint is locked.
pub const DEFAULT_INTRO_LENGTH: u32 = 100;

/// During the intro only wave 1 and multiples of this period are played.
pub const INTRO_REAL_WAVE_PERIOD: u32 = 10;

/// Share of elite cells that survive the intro phase.
pub const INTRO_CELL_FRACTION: f64 = 0.2;

/// Spawn rate for each spawn-rate index.
pub const SPAWN_RATE_SEQUENCE: [f64; SPAWN_STEP_COUNT] = [
    10.0, 11.0, 13.0, 15.0, 17.0, 19.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0, 32.0, 34.0, 36.0,
    37.0, 39.0, 40.0, 42.0, 44.0, 46.0, 48.0, 49.0, 50.0, 52.0, 54.0, 56.0,
];

/// Minimum wave at which each spawn-rate index becomes active.
pub const SPAWN_RATE_WAVES: [u32; SPAWN_STEP_COUNT] = [
    1, 3, 6, 20, 40, 60, 80, 100, 150, 200, 250, 300, 400, 600, 800, 1000, 1500, 2000, 2500, 3000,
    3500, 4000, 4500, 5000, 5500, 6000, 6500,
];

/// Share of spawns that are fast enemies at each spawn-rate index.
pub const FAST_SPAWN_CHANCE: [f64; SPAWN_STEP_COUNT] = [
    0.05, 0.05, 0.06, 0.07, 0.08, 0.09, 0.10, 0.10, 0.11, 0.11, 0.12, 0.12, 0.13, 0.13, 0.13, 0.14,
    0.15, 0.17, 0.18, 0.19, 0.20, 0.21, 0.21, 0.22, 0.23, 0.24, 0.24,
];

/// Share of spawns that are tank enemies at each spawn-rate index.
pub const TANK_SPAWN_CHANCE: [f64; SPAWN_STEP_COUNT] = [
    0.00, 0.02, 0.04, 0.06, 0.07, 0.08, 0.08, 0.09, 0.10, 0.11, 0.12, 0.13, 0.13, 0.14, 0.14, 0.15,
    0.16, 0.17, 0.18, 0.19, 0.19, 0.20, 0.20, 0.20, 0.21, 0.21, 0.22,
];

/// Share of spawns that are ranged enemies at each spawn-rate index.
pub const RANGED_SPAWN_CHANCE: [f64; SPAWN_STEP_COUNT] = [
    0.00, 0.00, 0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.06, 0.07, 0.07, 0.08, 0.09, 0.10, 0.11, 0.11,
    0.13, 0.14, 0.15, 0.16, 0.17, 0.18, 0.19, 0.19, 0.19, 0.20, 0.21,
];

/// Share of spawns that are protector enemies at each spawn-rate index.
pub const PROTECTOR_SPAWN_CHANCE: [f64; SPAWN_STEP_COUNT] = [
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.01, 0.01, 0.01, 0.02, 0.02, 0.02, 0.03, 0.03, 0.04, 0.04,
    0.04, 0.04, 0.04, 0.04, 0.04, 0.04, 0.04, 0.04, 0.04, 0.04, 0.04,
];

/// Share of spawns that are basic enemies: the complement of every other row.
#[must_use]
pub fn basic_spawn_chance(index: usize) -> f64 {
    1.0 - FAST_SPAWN_CHANCE[index]
        - TANK_SPAWN_CHANCE[index]
        - RANGED_SPAWN_CHANCE[index]
        - PROTECTOR_SPAWN_CHANCE[index]
}

/// Base coin drop of a basic enemy.
pub const BASIC_COIN_DROP: f64 = 0.33;
/// Base coin drop of a fast enemy.
pub const FAST_COIN_DROP: f64 = 2.0;
/// Base coin drop of a tank enemy.
pub const TANK_COIN_DROP: f64 = 4.0;
/// Base coin drop of a ranged enemy.
pub const RANGED_COIN_DROP: f64 = 2.0;
/// Base coin drop of a protector enemy.
pub const PROTECTOR_COIN_DROP: f64 = 3.0;
/// Base coin drop of a boss.
pub const BOSS_COIN_DROP: f64 = 50.0;
/// Base coin drop of a scatter elite, including the black hole bonus.
pub const SCATTER_COIN_DROP: f64 = 20.0;
/// Base coin drop of a vampire elite, including the black hole bonus.
pub const VAMPIRE_COIN_DROP: f64 = 20.0;
/// Base coin drop of a ray elite, including the black hole bonus.
pub const RAY_COIN_DROP: f64 = 20.0;

/// Coin bonus folded into the base drops; elites never receive it.
pub const BLACK_HOLE_COIN_BONUS: f64 = 5.0;

/// Extra scatter kills from repeated splitting: `2^1 + 2^2 + 2^3 + 2^4`.
pub const SCATTER_SPLIT_FACTOR: f64 = 2.0 + 4.0 + 8.0 + 16.0;

/// Coin multiplier granted by each tier.
pub const TIER_COIN_BONUS: [f64; TIER_COUNT] = [
    1.0, 1.8, 2.6, 3.4, 4.2, 5.0, 5.8, 6.6, 7.5, 8.7, 10.3, 12.2, 14.7, 17.6, 21.3, 25.4, 31.0,
    37.6,
];

/// Waves between consecutive bosses for each tier.
pub const BOSS_PERIOD: [u32; TIER_COUNT] = [10, 10, 10, 9, 9, 9, 8, 8, 8, 7, 7, 7, 6, 6, 6, 5, 5, 5];

/// Chance of a single elite spawn per wave for each elite chance step.
pub const ELITE_CHANCE_STEPS: [f64; ELITE_STEP_COUNT] =
    [0.0, 0.05, 0.10, 0.15, 0.20, 0.30, 0.40, 0.50, 0.60, 0.80, 1.0];

/// Chance that an elite spawn is doubled for each double-spawn step.
pub const DOUBLE_SPAWN_STEPS: [f64; ELITE_STEP_COUNT] =
    [0.0, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50];

/// Wave thresholds for each single elite spawn step per tier.
///
/// Index 0 is a sentinel and is never selected by a lookup.
pub const ELITE_SINGLE_THRESHOLDS: [[u32; ELITE_STEP_COUNT]; TIER_COUNT] = [
    [0, 100, 200, 400, 600, 800, 1000, 1500, 2000, 3000, 4000],
    [0, 80, 160, 320, 480, 640, 800, 1200, 1600, 2400, 3200],
    [0, 70, 130, 270, 400, 530, 670, 1000, 1330, 2000, 2670],
    [0, 60, 110, 230, 340, 460, 570, 860, 1140, 1710, 2290],
    [0, 50, 100, 200, 300, 400, 500, 750, 1000, 1500, 2000],
    [0, 40, 90, 180, 270, 360, 440, 670, 890, 1330, 1780],
    [0, 40, 80, 160, 240, 320, 400, 600, 800, 1200, 1600],
    [0, 40, 70, 150, 220, 290, 360, 550, 730, 1090, 1450],
    [0, 30, 70, 130, 200, 270, 330, 500, 670, 1000, 1330],
    [0, 30, 60, 120, 180, 250, 310, 460, 620, 920, 1230],
    [0, 30, 60, 110, 170, 230, 290, 430, 570, 860, 1140],
    [0, 30, 50, 110, 160, 210, 270, 400, 530, 800, 1070],
    [0, 20, 50, 100, 150, 200, 250, 380, 500, 750, 1000],
    [0, 20, 50, 90, 140, 190, 240, 350, 470, 710, 940],
    [0, 20, 40, 90, 130, 180, 220, 330, 440, 670, 890],
    [0, 20, 40, 80, 130, 170, 210, 320, 420, 630, 840],
    [0, 20, 40, 80, 120, 160, 200, 300, 400, 600, 800],
    [0, 20, 40, 80, 110, 150, 190, 290, 380, 570, 760],
];

/// Wave thresholds for each double elite spawn step per tier.
///
/// Index 0 is a sentinel and is never selected by a lookup.
pub const ELITE_DOUBLE_THRESHOLDS: [[u32; ELITE_STEP_COUNT]; TIER_COUNT] = [
    [0, 500, 1000, 1500, 2000, 3000, 4000, 5000, 6000, 8000, 10000],
    [0, 400, 800, 1200, 1600, 2400, 3200, 4000, 4800, 6400, 8000],
    [0, 330, 670, 1000, 1330, 2000, 2670, 3330, 4000, 5330, 6670],
    [0, 290, 570, 860, 1140, 1710, 2290, 2860, 3430, 4570, 5710],
    [0, 250, 500, 750, 1000, 1500, 2000, 2500, 3000, 4000, 5000],
    [0, 220, 440, 670, 890, 1330, 1780, 2220, 2670, 3560, 4440],
    [0, 200, 400, 600, 800, 1200, 1600, 2000, 2400, 3200, 4000],
    [0, 180, 360, 550, 730, 1090, 1450, 1820, 2180, 2910, 3640],
    [0, 170, 330, 500, 670, 1000, 1330, 1670, 2000, 2670, 3330],
    [0, 150, 310, 460, 620, 920, 1230, 1540, 1850, 2460, 3080],
    [0, 140, 290, 430, 570, 860, 1140, 1430, 1710, 2290, 2860],
    [0, 130, 270, 400, 530, 800, 1070, 1330, 1600, 2130, 2670],
    [0, 120, 250, 380, 500, 750, 1000, 1250, 1500, 2000, 2500],
    [0, 120, 240, 350, 470, 710, 940, 1180, 1410, 1880, 2350],
    [0, 110, 220, 330, 440, 670, 890, 1110, 1330, 1780, 2220],
    [0, 110, 210, 320, 420, 630, 840, 1050, 1260, 1680, 2110],
    [0, 100, 200, 300, 400, 600, 800, 1000, 1200, 1600, 2000],
    [0, 100, 190, 290, 380, 570, 760, 950, 1140, 1520, 1900],
];

/// Minimum and maximum elite cells dropped per elite kill for each tier.
pub const ELITE_CELL_RANGE: [(f64, f64); TIER_COUNT] = [
    (1.0, 3.0),
    (2.0, 4.0),
    (3.0, 5.0),
    (4.0, 6.0),
    (5.0, 8.0),
    (6.0, 9.0),
    (7.0, 10.0),
    (8.0, 12.0),
    (9.0, 13.0),
    (10.0, 15.0),
    (12.0, 18.0),
    (14.0, 21.0),
    (16.0, 24.0),
    (18.0, 27.0),
    (20.0, 30.0),
    (23.0, 34.0),
    (26.0, 39.0),
    (30.0, 45.0),
];

/// Chance that a boss drops reroll shards.
pub const REROLL_SHARD_DROP_CHANCE: f64 = 0.5;

/// Reroll shards granted by a single reroll drop for each tier.
pub const TIER_REROLL_VALUE: [f64; TIER_COUNT] = [
    2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 28.0,
    31.0,
];

/// Chance that a boss drops a common module.
pub const COMMON_MODULE_CHANCE: f64 = 0.015;

/// Chance that a boss drops a rare module.
pub const RARE_MODULE_CHANCE: f64 = 0.0015;

/// Module shards obtained from a common module.
pub const COMMON_MODULE_SHARD_VALUE: f64 = 10.0;

/// Module shards obtained from a rare module.
pub const RARE_MODULE_SHARD_VALUE: f64 = 30.0;

/// Coin multiplier per coin mastery level.
pub const COIN_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [1.03, 1.06, 1.09, 1.12, 1.15, 1.18, 1.21, 1.24, 1.27, 1.30];

/// Orb coin multiplier per extra orb mastery level.
pub const EXTRA_ORB_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [1.04, 1.08, 1.12, 1.16, 1.20, 1.24, 1.28, 1.32, 1.36, 1.40];

/// Additional basic-enemy coin share per critical coin mastery level.
pub const CRITICAL_COIN_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Chance that a wave skip becomes a double skip per wave skip mastery level.
pub const WAVE_SKIP_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55];

/// Intro phase length per intro sprint mastery level.
pub const INTRO_SPRINT_MASTERY_TABLE: [u32; MASTERY_LEVEL_COUNT] =
    [180, 360, 540, 720, 900, 1080, 1260, 1440, 1620, 1800];

/// Replacement for [`SPAWN_RATE_WAVES`] per wave accelerator mastery level.
pub const WAVE_ACCELERATOR_MASTERY_TABLE: [[u32; SPAWN_STEP_COUNT]; MASTERY_LEVEL_COUNT] = [
    [
        1, 3, 5, 18, 36, 55, 73, 91, 136, 182, 227, 273, 364, 545, 727, 909, 1364, 1818, 2273,
        2727, 3182, 3636, 4091, 4545, 5000, 5455, 5909,
    ],
    [
        1, 3, 5, 17, 33, 50, 67, 83, 125, 167, 208, 250, 333, 500, 667, 833, 1250, 1667, 2083,
        2500, 2917, 3333, 3750, 4167, 4583, 5000, 5417,
    ],
    [
        1, 2, 5, 15, 31, 46, 62, 77, 115, 154, 192, 231, 308, 462, 615, 769, 1154, 1538, 1923,
        2308, 2692, 3077, 3462, 3846, 4231, 4615, 5000,
    ],
    [
        1, 2, 4, 14, 29, 43, 57, 71, 107, 143, 179, 214, 286, 429, 571, 714, 1071, 1429, 1786,
        2143, 2500, 2857, 3214, 3571, 3929, 4286, 4643,
    ],
    [
        1, 2, 4, 13, 27, 40, 53, 67, 100, 133, 167, 200, 267, 400, 533, 667, 1000, 1333, 1667,
        2000, 2333, 2667, 3000, 3333, 3667, 4000, 4333,
    ],
    [
        1, 2, 4, 13, 25, 38, 50, 63, 94, 125, 156, 188, 250, 375, 500, 625, 938, 1250, 1563, 1875,
        2188, 2500, 2813, 3125, 3438, 3750, 4063,
    ],
    [
        1, 2, 4, 12, 24, 35, 47, 59, 88, 118, 147, 176, 235, 353, 471, 588, 882, 1176, 1471, 1765,
        2059, 2353, 2647, 2941, 3235, 3529, 3824,
    ],
    [
        1, 2, 3, 11, 22, 33, 44, 56, 83, 111, 139, 167, 222, 333, 444, 556, 833, 1111, 1389, 1667,
        1944, 2222, 2500, 2778, 3056, 3333, 3611,
    ],
    [
        1, 2, 3, 11, 21, 32, 42, 53, 79, 105, 132, 158, 211, 316, 421, 526, 789, 1053, 1316, 1579,
        1842, 2105, 2368, 2632, 2895, 3158, 3421,
    ],
    [
        1, 2, 3, 10, 20, 30, 40, 50, 75, 100, 125, 150, 200, 300, 400, 500, 750, 1000, 1250, 1500,
        1750, 2000, 2250, 2500, 2750, 3000, 3250,
    ],
];

/// Bonus to the elite double-spawn chance per enemy balance mastery level.
pub const ENEMY_BALANCE_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50];

/// Chance that an elite drops reroll shards per cash mastery level.
pub const CASH_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [0.02, 0.04, 0.06, 0.08, 0.10, 0.12, 0.14, 0.16, 0.18, 0.20];

/// Chance that a recovery package contains a common module per recovery
/// package mastery level.
pub const RECOVERY_PACKAGE_MASTERY_TABLE: [f64; MASTERY_LEVEL_COUNT] =
    [0.001, 0.002, 0.003, 0.004, 0.005, 0.006, 0.007, 0.008, 0.009, 0.010];

/// Stone cost of the coin mastery.
pub const COIN_STONE_COST: f64 = 1250.0;
/// Stone cost of the extra orb mastery.
pub const EXTRA_ORB_STONE_COST: f64 = 750.0;
/// Stone cost of the critical coin mastery.
pub const CRITICAL_COIN_STONE_COST: f64 = 1000.0;
/// Stone cost of the wave skip mastery.
pub const WAVE_SKIP_STONE_COST: f64 = 1000.0;
/// Stone cost of the intro sprint mastery.
pub const INTRO_SPRINT_STONE_COST: f64 = 1250.0;
/// Stone cost of the wave accelerator mastery.
pub const WAVE_ACCELERATOR_STONE_COST: f64 = 1000.0;
/// Stone cost of the enemy balance mastery.
pub const ENEMY_BALANCE_STONE_COST: f64 = 1250.0;
/// Stone cost of the cash mastery.
pub const CASH_STONE_COST: f64 = 750.0;
/// Stone cost of the recovery package mastery.
pub const RECOVERY_PACKAGE_STONE_COST: f64 = 750.0;
