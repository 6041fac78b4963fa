use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoidError};

/// Largest kernel edge accepted for blur or morphology.
pub const MAX_KERNEL_SIZE: u32 = 101;

/// Tunable parameters of the void-content analysis.
///
/// The defaults reproduce the tuned values for carbon-fibre weave
/// micrographs: a 5x5 blur with derived sigma, a manual cutoff of 50 and a
/// 2% acceptance limit. Every field may be omitted from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pixels strictly darker than this (after blurring) count as voids.
    pub threshold: u8,
    /// Void percentage below which the sample is acceptable.
    pub acceptance_limit: f64,
    /// Edge length of the Gaussian kernel. Must be odd.
    pub blur_kernel_size: u32,
    /// Gaussian sigma; 0 derives it from the kernel size.
    pub blur_sigma: f64,
    /// Edge length of the square structuring element. Must be odd.
    pub morph_kernel_size: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: 50,
            acceptance_limit: 2.0,
            blur_kernel_size: 5,
            blur_sigma: 0.0,
            morph_kernel_size: 3,
        }
    }
}

/// Values given on the command line; `None` keeps the config value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub threshold: Option<u8>,
    pub acceptance_limit: Option<f64>,
    pub blur_kernel_size: Option<u32>,
    pub morph_kernel_size: Option<u32>,
}

impl AnalysisConfig {
    /// Apply overrides on top of this config, then validate the result.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(threshold) = overrides.threshold {
            self.threshold = threshold;
        }
        if let Some(limit) = overrides.acceptance_limit {
            self.acceptance_limit = limit;
        }
        if let Some(size) = overrides.blur_kernel_size {
            self.blur_kernel_size = size;
        }
        if let Some(size) = overrides.morph_kernel_size {
            self.morph_kernel_size = size;
        }
        self.validate()?;
        Ok(self)
    }

    /// Read a config from a TOML file and validate it.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| VoidError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|e| VoidError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VoidError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        check_kernel_size("blur_kernel_size", self.blur_kernel_size)?;
        check_kernel_size("morph_kernel_size", self.morph_kernel_size)?;

        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(VoidError::InvalidConfig(format!(
                "blur_sigma must be a non-negative number, got {}",
                self.blur_sigma
            )));
        }

        if !self.acceptance_limit.is_finite()
            || !(0.0..=100.0).contains(&self.acceptance_limit)
        {
            return Err(VoidError::InvalidConfig(format!(
                "acceptance_limit must lie in [0, 100], got {}",
                self.acceptance_limit
            )));
        }

        Ok(())
    }
}

pub(crate) fn check_kernel_size(name: &str, size: u32) -> Result<()> {
    if size == 0 || size % 2 == 0 || size > MAX_KERNEL_SIZE {
        return Err(VoidError::InvalidConfig(format!(
            "{name} must be an odd number between 1 and {MAX_KERNEL_SIZE}, got {size}"
        )));
    }
    Ok(())
}
