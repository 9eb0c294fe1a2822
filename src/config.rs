// ⚙️ Settings - scoring weights, metric references and runtime options
//
// Every field has a default equal to the constants the cockpit has always
// used, so a partial JSON file only overrides what it names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a JSON settings file
pub const CONFIG_ENV_VAR: &str = "AGENCY_CONSOLE_CONFIG";

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: String,
    pub currency: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: "pt-BR".to_string(),
            currency: "BRL".to_string(),
        }
    }
}

/// Weights of the client health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthWeights {
    pub base_score: i64,
    pub complaint_penalty: i64,
    pub incident_penalty: i64,
    pub overdue_penalty: i64,
    pub completed_goal_bonus: i64,
    /// Score at or above which a client is HEALTHY
    pub healthy_threshold: u32,
    /// Score at or above which a client is AT_RISK (below is CRITICAL)
    pub at_risk_threshold: u32,
}

impl Default for HealthWeights {
    fn default() -> Self {
        HealthWeights {
            base_score: 100,
            complaint_penalty: 15,
            incident_penalty: 10,
            overdue_penalty: 2,
            completed_goal_bonus: 10,
            healthy_threshold: 80,
            at_risk_threshold: 50,
        }
    }
}

/// Scaling constants and static baselines of the cockpit radar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricReferences {
    pub profit_margin_scale: f64,
    pub liquidity_scale: f64,
    pub fixed_cost_scale: f64,
    /// Monthly income considered a full inbound bar
    pub inbound_reference: f64,
    /// Balance considered a full cash-health bar
    pub cash_reference: f64,
    pub retention: f64,
    pub roi: f64,
    pub tax_efficiency: f64,
    pub growth_mom: f64,
    pub investment: f64,
}

impl Default for MetricReferences {
    fn default() -> Self {
        MetricReferences {
            profit_margin_scale: 1.5,
            liquidity_scale: 20.0,
            fixed_cost_scale: 50.0,
            inbound_reference: 20_000.0,
            cash_reference: 10_000.0,
            retention: 85.0,
            roi: 72.0,
            tax_efficiency: 90.0,
            growth_mom: 65.0,
            investment: 40.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// JSON snapshot to load instead of the built-in demo data
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub health: HealthWeights,
    pub metrics: MetricReferences,
    pub data: DataSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;

        let settings: Settings =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load from `AGENCY_CONSOLE_CONFIG` when set, otherwise defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::info!(path = ?path, "loading settings");
                Settings::load(PathBuf::from(path))
            }
            None => Ok(Settings::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.health.at_risk_threshold > self.health.healthy_threshold {
            anyhow::bail!(
                "at_risk_threshold ({}) must not exceed healthy_threshold ({})",
                self.health.at_risk_threshold,
                self.health.healthy_threshold
            );
        }
        let health = &self.health;
        if health.complaint_penalty < 0
            || health.incident_penalty < 0
            || health.overdue_penalty < 0
            || health.completed_goal_bonus < 0
        {
            anyhow::bail!("health penalties and bonuses must not be negative");
        }
        if self.metrics.inbound_reference <= 0.0 || self.metrics.cash_reference <= 0.0 {
            anyhow::bail!("metric references must be positive");
        }
        Ok(())
    }
}
