use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use roster_forecast::models::{
    AcademicThresholds, ConfidenceLevel, ForecastConfig, RecruitingTargets, ScholarshipPolicy,
    DEFAULT_HORIZON_YEARS, MAX_HORIZON_YEARS, MIN_HORIZON_YEARS, NCAA_MEN_LIMIT, NCAA_WOMEN_LIMIT,
};

/// Environment variable naming the roster file, ahead of `[roster] path`
pub const ROSTER_PATH_ENV: &str = "ROSTER_FORECAST_ROSTER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub scholarships: ScholarshipsConfig,

    #[serde(default)]
    pub forecast: ForecastSettings,

    #[serde(default)]
    pub recruiting: RecruitingConfig,

    #[serde(default)]
    pub academics: AcademicsConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Roster CSV location; empty means `~/.roster-forecast/roster.csv`
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipsConfig {
    #[serde(default = "default_full_scholarship_value")]
    pub full_scholarship_value: f64,

    #[serde(default = "default_men_limit")]
    pub men_limit: f64,

    #[serde(default = "default_women_limit")]
    pub women_limit: f64,

    #[serde(default = "default_annual_cost_increase")]
    pub annual_cost_increase: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSettings {
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    #[serde(default)]
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitingConfig {
    #[serde(default = "default_sprints")]
    pub sprints: u32,

    #[serde(default = "default_hurdles")]
    pub hurdles: u32,

    #[serde(default = "default_distance")]
    pub distance: u32,

    #[serde(default = "default_jumps")]
    pub jumps: u32,

    #[serde(default = "default_throws")]
    pub throws: u32,

    #[serde(default = "default_multi_events")]
    pub multi_events: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicsConfig {
    #[serde(default = "default_risk_gpa")]
    pub risk_gpa: f64,

    #[serde(default = "default_watch_gpa")]
    pub watch_gpa: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default value functions
fn default_full_scholarship_value() -> f64 {
    ScholarshipPolicy::default().full_scholarship_value
}

fn default_men_limit() -> f64 {
    NCAA_MEN_LIMIT
}

fn default_women_limit() -> f64 {
    NCAA_WOMEN_LIMIT
}

fn default_annual_cost_increase() -> f64 {
    ScholarshipPolicy::default().annual_cost_increase
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

fn default_sprints() -> u32 {
    RecruitingTargets::default().sprints
}

fn default_hurdles() -> u32 {
    RecruitingTargets::default().hurdles
}

fn default_distance() -> u32 {
    RecruitingTargets::default().distance
}

fn default_jumps() -> u32 {
    RecruitingTargets::default().jumps
}

fn default_throws() -> u32 {
    RecruitingTargets::default().throws
}

fn default_multi_events() -> u32 {
    RecruitingTargets::default().multi_events
}

fn default_risk_gpa() -> f64 {
    AcademicThresholds::default().risk_gpa
}

fn default_watch_gpa() -> f64 {
    AcademicThresholds::default().watch_gpa
}

fn default_true() -> bool {
    true
}

impl Default for ScholarshipsConfig {
    fn default() -> Self {
        Self {
            full_scholarship_value: default_full_scholarship_value(),
            men_limit: default_men_limit(),
            women_limit: default_women_limit(),
            annual_cost_increase: default_annual_cost_increase(),
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            confidence: ConfidenceLevel::default(),
        }
    }
}

impl Default for RecruitingConfig {
    fn default() -> Self {
        Self {
            sprints: default_sprints(),
            hurdles: default_hurdles(),
            distance: default_distance(),
            jumps: default_jumps(),
            throws: default_throws(),
            multi_events: default_multi_events(),
        }
    }
}

impl Default for AcademicsConfig {
    fn default() -> Self {
        Self {
            risk_gpa: default_risk_gpa(),
            watch_gpa: default_watch_gpa(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.roster-forecast/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".roster-forecast"))
    }

    /// Get config file path (~/.roster-forecast/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// The `--config` path when given, otherwise the default file
    pub fn resolve_file(config_override: Option<&Path>) -> Result<PathBuf> {
        match config_override {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from the default file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Roster file: env override, then `[roster] path`, then the config directory
    pub fn roster_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(ROSTER_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        if !self.roster.path.trim().is_empty() {
            return Ok(PathBuf::from(&self.roster.path));
        }

        Ok(Self::config_dir()?.join("roster.csv"))
    }

    pub fn scholarship_policy(&self) -> ScholarshipPolicy {
        ScholarshipPolicy {
            full_scholarship_value: self.scholarships.full_scholarship_value,
            men_limit: self.scholarships.men_limit,
            women_limit: self.scholarships.women_limit,
            annual_cost_increase: self.scholarships.annual_cost_increase,
        }
    }

    pub fn recruiting_targets(&self) -> RecruitingTargets {
        RecruitingTargets {
            sprints: self.recruiting.sprints,
            hurdles: self.recruiting.hurdles,
            distance: self.recruiting.distance,
            jumps: self.recruiting.jumps,
            throws: self.recruiting.throws,
            multi_events: self.recruiting.multi_events,
        }
    }

    pub fn academic_thresholds(&self) -> AcademicThresholds {
        AcademicThresholds {
            risk_gpa: self.academics.risk_gpa,
            watch_gpa: self.academics.watch_gpa,
        }
    }

    /// Reject values the services cannot work with
    pub fn validate(&self) -> Result<()> {
        self.scholarship_policy().validate()?;
        self.academic_thresholds().validate()?;

        let horizon = self.forecast.horizon_years;
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&horizon) {
            anyhow::bail!(
                "forecast.horizon_years {} is outside {}-{}",
                horizon,
                MIN_HORIZON_YEARS,
                MAX_HORIZON_YEARS
            );
        }
        Ok(())
    }

    /// Forecast inputs for a run starting at `base_year`
    pub fn to_forecast_config(&self, base_year: i32) -> ForecastConfig {
        ForecastConfig::new(base_year)
            .with_horizon(self.forecast.horizon_years)
            .with_confidence(self.forecast.confidence)
            .with_policy(self.scholarship_policy())
            .with_targets(self.recruiting_targets())
    }
}
