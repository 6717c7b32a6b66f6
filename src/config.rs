use std::error::Error;
use std::str::FromStr;

/// Default run length: three minutes of game time.
const DEFAULT_MAX_TICKS: u64 = 3 * 60 * 60;

/// Runtime knobs for the headless host. Read from `CELLSTORM_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Stop after this many host ticks. 0 runs until interrupted.
    pub max_ticks: u64,
    /// Print the tile grid every N ticks. 0 disables dumps.
    pub dump_every: u64,
    /// Autopilot seed. `None` picks one at random.
    pub seed: Option<u64>,
    /// Pace the loop against the wall clock instead of running flat out.
    pub realtime: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            dump_every: 0,
            seed: None,
            realtime: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Box<dyn Error>> {
        let mut config = Self::default();
        if let Some(v) = parse(&lookup, "CELLSTORM_MAX_TICKS")? {
            config.max_ticks = v;
        }
        if let Some(v) = parse(&lookup, "CELLSTORM_DUMP_EVERY")? {
            config.dump_every = v;
        }
        config.seed = parse(&lookup, "CELLSTORM_SEED")?;
        if let Some(v) = lookup("CELLSTORM_REALTIME") {
            config.realtime = match v.trim() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => return Err(format!("CELLSTORM_REALTIME: expected a boolean, got {other:?}").into()),
            };
        }
        Ok(config)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{key}: invalid value {raw:?}: {e}").into()),
    }
}
