//! Simulation parameters and the preset catalog.
//!
//! A [`Config`] is a small `Copy` value. The host never edits one in place;
//! every control change builds a new value and hands it to the simulator,
//! which is the only place that decides whether the grid has to be rebuilt.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Largest neighbor count a Moore neighborhood can produce.
pub const MAX_NEIGHBORS: u8 = 8;

/// Range the UI keeps trail persistence in.
pub const MAX_TRAILS: f32 = 0.95;

/// Smallest cell size the keyboard control goes down to.
pub const MIN_RESOLUTION: u32 = 2;

/// Largest accepted cell size in pixels.
pub const MAX_RESOLUTION: u32 = 32;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("neighbor count {0} is outside 0..=8")]
    CountOutOfRange(u32),
    #[error("rule number {0} is outside 0..=255")]
    RuleOutOfRange(u32),
    #[error("resolution must be at least one pixel")]
    ZeroResolution,
    #[error("resolution {0} is above the 32 pixel maximum")]
    ResolutionTooLarge(u32),
    #[error("step frequency {0} must be a finite, non-negative number")]
    BadSpeed(f64),
    #[error("hue {0} is outside 0..360")]
    HueOutOfRange(f32),
    #[error("trail persistence {0} is outside 0.0..=0.95")]
    TrailsOutOfRange(f32),
    #[error("malformed rule string {0:?}, expected something like B3/S23")]
    MalformedRule(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    OneD,
    TwoD,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::OneD => Mode::TwoD,
            Mode::TwoD => Mode::OneD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Classic,
    Age,
    Density,
    Cycle,
}

impl ColorMode {
    /// Next mode in the order the keyboard control cycles through them.
    pub fn next(self) -> Self {
        match self {
            ColorMode::Classic => ColorMode::Age,
            ColorMode::Age => ColorMode::Density,
            ColorMode::Density => ColorMode::Cycle,
            ColorMode::Cycle => ColorMode::Classic,
        }
    }
}

/// A set of neighbor counts in `0..=8`, stored as a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CountSet(u16);

impl CountSet {
    /// Builds a set from literal counts.
    ///
    /// # Panics
    /// Panics if a count is above 8. Meant for constants; use
    /// [`CountSet::from_counts`] for anything a user typed.
    pub const fn of(counts: &[u8]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < counts.len() {
            assert!(counts[i] <= MAX_NEIGHBORS, "neighbor count above 8");
            bits |= 1 << counts[i];
            i += 1;
        }
        CountSet(bits)
    }

    pub fn from_counts<I>(counts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut bits = 0u16;
        for count in counts {
            if count > MAX_NEIGHBORS as u32 {
                return Err(ConfigError::CountOutOfRange(count));
            }
            bits |= 1 << count;
        }
        Ok(CountSet(bits))
    }

    pub fn contains(self, count: u8) -> bool {
        count <= MAX_NEIGHBORS && self.0 & (1 << count) != 0
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&c| self.contains(c))
    }
}

impl fmt::Display for CountSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for count in self.iter() {
            write!(f, "{}", count)?;
        }
        Ok(())
    }
}

/// Birth/survival pair written in the usual `B3/S23` notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeRule {
    pub birth: CountSet,
    pub survival: CountSet,
}

impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survival)
    }
}

impl FromStr for LifeRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedRule(s.to_string());
        let (b, rest) = s.trim().split_once('/').ok_or_else(malformed)?;
        let b = b
            .strip_prefix('B')
            .or_else(|| b.strip_prefix('b'))
            .ok_or_else(malformed)?;
        let rest = rest
            .strip_prefix('S')
            .or_else(|| rest.strip_prefix('s'))
            .ok_or_else(malformed)?;

        let digits = |part: &str| -> Result<CountSet, ConfigError> {
            let counts = part
                .chars()
                .map(|c| c.to_digit(10).ok_or_else(malformed))
                .collect::<Result<Vec<_>, _>>()?;
            CountSet::from_counts(counts)
        };

        Ok(LifeRule {
            birth: digits(b)?,
            survival: digits(rest)?,
        })
    }
}

/// Converts a user-supplied number into a 1D rule.
pub fn rule_number(n: u32) -> Result<u8, ConfigError> {
    u8::try_from(n).map_err(|_| ConfigError::RuleOutOfRange(n))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub mode: Mode,
    /// Wolfram rule number for 1D mode.
    pub rule: u8,
    pub birth: CountSet,
    pub survival: CountSet,
    /// Edge length of one cell in pixels.
    pub resolution: u32,
    /// Steps per second.
    pub speed: f64,
    /// Base hue in degrees, in `0.0..360.0`. 360 is written as 0.
    pub hue: f32,
    pub color_mode: ColorMode,
    /// Fraction of the previous frame kept on screen.
    pub trails: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::TwoD,
            rule: 30,
            birth: CountSet::of(&[3]),
            survival: CountSet::of(&[2, 3]),
            resolution: 6,
            speed: 15.0,
            hue: 160.0,
            color_mode: ColorMode::Age,
            trails: 0.5,
        }
    }
}

impl Config {
    /// Checks the ranges the core assumes. The core itself never clamps;
    /// callers are expected to keep values inside these bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::ResolutionTooLarge(self.resolution));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::BadSpeed(self.speed));
        }
        if !(0.0..360.0).contains(&self.hue) {
            return Err(ConfigError::HueOutOfRange(self.hue));
        }
        if !(0.0..=MAX_TRAILS).contains(&self.trails) {
            return Err(ConfigError::TrailsOutOfRange(self.trails));
        }
        Ok(())
    }

    pub fn life_rule(&self) -> LifeRule {
        LifeRule {
            birth: self.birth,
            survival: self.survival,
        }
    }

    /// Overlays a preset onto this configuration.
    #[must_use]
    pub fn merge(self, partial: &PartialConfig) -> Config {
        let mut merged = self;
        merged.mode = partial.mode;
        if let Some(rule) = partial.rule {
            merged.rule = rule;
        }
        if let Some(life) = partial.life {
            merged.birth = life.birth;
            merged.survival = life.survival;
        }
        merged
    }
}

/// The part of a [`Config`] a preset pins down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartialConfig {
    pub mode: Mode,
    pub rule: Option<u8>,
    pub life: Option<LifeRule>,
}

impl PartialConfig {
    pub const fn elementary(rule: u8) -> Self {
        PartialConfig {
            mode: Mode::OneD,
            rule: Some(rule),
            life: None,
        }
    }

    pub const fn life(birth: &[u8], survival: &[u8]) -> Self {
        PartialConfig {
            mode: Mode::TwoD,
            rule: None,
            life: Some(LifeRule {
                birth: CountSet::of(birth),
                survival: CountSet::of(survival),
            }),
        }
    }
}

#[derive(Debug)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub config: PartialConfig,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        key: "life",
        name: "Conway's Life",
        description: "The classic: births on 3, survival on 2 or 3.",
        config: PartialConfig::life(&[3], &[2, 3]),
    },
    Preset {
        key: "highlife",
        name: "HighLife",
        description: "Life plus births on 6, home of a self-replicator.",
        config: PartialConfig::life(&[3, 6], &[2, 3]),
    },
    Preset {
        key: "seeds",
        name: "Seeds",
        description: "Every live cell dies each generation; explosive growth.",
        config: PartialConfig::life(&[2], &[]),
    },
    Preset {
        key: "daynight",
        name: "Day & Night",
        description: "Symmetric under inversion of live and dead cells.",
        config: PartialConfig::life(&[3, 6, 7, 8], &[3, 4, 6, 7, 8]),
    },
    Preset {
        key: "maze",
        name: "Maze",
        description: "Grows corridors that settle into maze-like walls.",
        config: PartialConfig::life(&[3], &[1, 2, 3, 4, 5]),
    },
    Preset {
        key: "coral",
        name: "Coral",
        description: "Slow, dense growth that creeps outward.",
        config: PartialConfig::life(&[3], &[4, 5, 6, 7, 8]),
    },
    Preset {
        key: "rule30",
        name: "Rule 30",
        description: "Chaotic elementary automaton.",
        config: PartialConfig::elementary(30),
    },
    Preset {
        key: "rule90",
        name: "Rule 90",
        description: "XOR of both neighbors; draws a Sierpinski triangle.",
        config: PartialConfig::elementary(90),
    },
    Preset {
        key: "rule110",
        name: "Rule 110",
        description: "Turing complete, with gliders drifting left.",
        config: PartialConfig::elementary(110),
    },
    Preset {
        key: "rule184",
        name: "Rule 184",
        description: "Traffic flow: particles move right when there is room.",
        config: PartialConfig::elementary(184),
    },
];

pub fn find_preset(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}
