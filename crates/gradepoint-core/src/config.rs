//! Configuration loading.
//!
//! Institutional limits only feed pre-flight validation; display settings
//! only feed renderers. Neither changes what the engine computes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Institutional bounds checked before calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Largest credit value accepted for a single course.
    #[serde(default = "default_max_credits")]
    pub max_credits: Decimal,
    /// Largest prior GPA accepted.
    #[serde(default = "default_max_gpa")]
    pub max_gpa: Decimal,
    /// Largest prior credit total accepted. Prior quality points are
    /// bounded by `max_prior_credits × max_gpa`.
    #[serde(default = "default_max_prior_credits")]
    pub max_prior_credits: Decimal,
}

fn default_max_credits() -> Decimal {
    Decimal::from(6)
}
fn default_max_gpa() -> Decimal {
    Decimal::from(4)
}
fn default_max_prior_credits() -> Decimal {
    Decimal::from(1000)
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_credits: default_max_credits(),
            max_gpa: default_max_gpa(),
            max_prior_credits: default_max_prior_credits(),
        }
    }
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places shown for GPA and quality points.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    2
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

/// Top-level gradepoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradepointConfig {
    #[serde(default)]
    pub limits: ValidationLimits,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Where `calc --output` writes when no directory is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradepoint-reports")
}

impl Default for GradepointConfig {
    fn default() -> Self {
        Self {
            limits: ValidationLimits::default(),
            display: DisplayConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = lookup(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Apply `GRADEPOINT_*` overrides and expand `${VAR}` in paths.
fn apply_overrides(
    mut config: GradepointConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<GradepointConfig> {
    if let Some(raw) = lookup("GRADEPOINT_MAX_CREDITS") {
        config.limits.max_credits = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid GRADEPOINT_MAX_CREDITS: '{raw}'"))?;
    }

    if let Some(raw) = lookup("GRADEPOINT_PRECISION") {
        config.display.precision = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid GRADEPOINT_PRECISION: '{raw}'"))?;
    }

    let output_dir = config.output_dir.to_string_lossy().into_owned();
    config.output_dir = PathBuf::from(resolve_env_vars(&output_dir, &lookup));

    Ok(config)
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order when no path is given:
/// 1. `gradepoint.toml` in the current directory
/// 2. `~/.config/gradepoint/config.toml`
///
/// Environment variable overrides: `GRADEPOINT_MAX_CREDITS`, `GRADEPOINT_PRECISION`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradepointConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradepoint.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradepointConfig::default(),
    };

    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Parse configuration TOML without applying overrides.
pub fn parse_config_str(content: &str) -> Result<GradepointConfig> {
    Ok(toml::from_str::<GradepointConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradepoint"))
}
