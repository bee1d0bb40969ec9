use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use playlearn_algo::progress::normalize_tiers;
use playlearn_algo::{GameType, GeneratorConfig, PlannerConfig, RewardTier, SubjectRequirements};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid reward tier table: {0}")]
    RewardTiers(#[from] serde_json::Error),
    #[error("reward tier table is empty")]
    EmptyRewardTiers,
    #[error("reward tier {0} has a negative threshold")]
    NegativeThreshold(String),
    #[error("unparsable value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("unknown game type in {key}: {value}")]
    UnknownGameType { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub planner: PlannerConfig,
    pub generator: GeneratorConfig,
    pub requirements: SubjectRequirements,
    /// Sorted ascending by threshold
    pub reward_tiers: Vec<RewardTier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            log_level: "info".to_string(),
            planner: PlannerConfig::default(),
            generator: GeneratorConfig::default(),
            requirements: SubjectRequirements::default(),
            reward_tiers: RewardTier::default_table(),
        }
    }
}

impl Config {
    /// Read configuration from the environment. Invalid values fall back to defaults
    /// and are logged as warnings; nothing here aborts startup.
    pub fn from_env() -> Self {
        let (config, issues) = Self::load(|key| std::env::var(key).ok());
        for issue in &issues {
            tracing::warn!(error = %issue, "falling back to default setting");
        }
        config
    }

    /// Log filter directive, read before the rest of the configuration so the
    /// subscriber is installed first.
    pub fn log_level_from_env() -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| Self::default().log_level)
    }

    /// Build a configuration from `lookup`, returning every setting that was ignored.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let mut issues = Vec::new();

        let mut parse = |key: &str| -> Option<usize> { parse_setting(&lookup, key, &mut issues) };
        let planner = PlannerConfig {
            scramble_slots: parse("SCRAMBLE_SLOTS").unwrap_or(defaults.planner.scramble_slots),
            judgment_slots: parse("JUDGMENT_SLOTS").unwrap_or(defaults.planner.judgment_slots),
            direct_fill_minimum: parse("DIRECT_FILL_MINIMUM")
                .unwrap_or(defaults.planner.direct_fill_minimum),
        };
        let max_attempts = parse("MAX_GENERATION_ATTEMPTS");

        let port = parse_setting(&lookup, "PORT", &mut issues).unwrap_or(defaults.port);
        let host = parse_setting(&lookup, "HOST", &mut issues).unwrap_or(defaults.host);
        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        let generator = GeneratorConfig {
            max_attempts: max_attempts
                .filter(|n| *n > 0)
                .unwrap_or(defaults.generator.max_attempts),
            ..defaults.generator
        };

        let mut required = |key: &str| -> Option<Vec<GameType>> {
            let raw = lookup(key)?;
            parse_required_games(key, &raw)
                .map_err(|err| issues.push(err))
                .ok()
        };
        let requirements = SubjectRequirements {
            english: required("REQUIRED_GAMES_ENGLISH").unwrap_or(defaults.requirements.english),
            math: required("REQUIRED_GAMES_MATH").unwrap_or(defaults.requirements.math),
        };

        let reward_tiers = match lookup("REWARD_TIERS_PATH") {
            Some(path) if !path.trim().is_empty() => match load_reward_tiers(path.trim()) {
                Ok(tiers) => tiers,
                Err(err) => {
                    issues.push(err);
                    defaults.reward_tiers
                }
            },
            _ => defaults.reward_tiers,
        };

        let config = Self {
            host,
            port,
            log_level,
            planner,
            generator,
            requirements,
            reward_tiers,
        };
        (config, issues)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_setting<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    issues: &mut Vec<ConfigError>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            issues.push(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            });
            None
        }
    }
}

/// Parse a comma-separated list of game type identifiers.
pub fn parse_required_games(key: &str, raw: &str) -> Result<Vec<GameType>, ConfigError> {
    let mut games = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let game = GameType::parse(part).ok_or_else(|| ConfigError::UnknownGameType {
            key: key.to_string(),
            value: part.to_string(),
        })?;
        if !games.contains(&game) {
            games.push(game);
        }
    }
    Ok(games)
}

/// Load a reward tier table from a JSON array file.
pub fn load_reward_tiers(path: impl AsRef<Path>) -> Result<Vec<RewardTier>, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_reward_tiers(&raw)
}

pub fn parse_reward_tiers(raw: &str) -> Result<Vec<RewardTier>, ConfigError> {
    let tiers: Vec<RewardTier> = serde_json::from_str(raw)?;
    if tiers.is_empty() {
        return Err(ConfigError::EmptyRewardTiers);
    }
    if let Some(tier) = tiers.iter().find(|t| t.stars_required < 0) {
        return Err(ConfigError::NegativeThreshold(tier.id.clone()));
    }
    Ok(normalize_tiers(tiers))
}
