//! Configuration types deserialized from `mulscope.toml`.

use mulscope_common::{Frequency, Variant};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The top-level run configuration parsed from `mulscope.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MulscopeConfig {
    /// Project metadata and output location.
    pub project: ProjectMeta,
    /// How the external synthesis tool is invoked.
    #[serde(default)]
    pub tool: ToolConfig,
    /// Synthesis script per variant name.
    #[serde(default = "default_variants")]
    pub variants: BTreeMap<String, VariantConfig>,
    /// Power-model operating point.
    #[serde(default)]
    pub model: ModelConfig,
}

impl Default for MulscopeConfig {
    fn default() -> Self {
        Self {
            project: ProjectMeta::default(),
            tool: ToolConfig::default(),
            variants: default_variants(),
            model: ModelConfig::default(),
        }
    }
}

impl MulscopeConfig {
    /// The configured variants with their scripts, in canonical variant order.
    pub fn variant_scripts(&self) -> Vec<(Variant, &Path)> {
        let mut scripts: Vec<_> = self
            .variants
            .iter()
            .map(|(name, v)| (Variant::from_name(name), v.script.as_path()))
            .collect();
        scripts.sort_by(|a, b| a.0.cmp(&b.0));
        scripts
    }

    /// Path of the persisted result document.
    pub fn results_file(&self) -> PathBuf {
        self.project.results_dir.join("analysis_results.json")
    }

    /// Path of the synthesis log for one variant.
    pub fn log_file(&self, variant: &Variant) -> PathBuf {
        self.project
            .results_dir
            .join(format!("{}_synthesis.log", variant.file_stem()))
    }
}

/// Core project metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Directory receiving logs and the result document.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self {
            name: "multipliers".to_string(),
            results_dir: default_results_dir(),
        }
    }
}

/// Synthesis tool invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolConfig {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,
    /// Per-variant wall-clock limit in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ToolConfig {
    /// The per-variant timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// One variant's synthesis input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantConfig {
    /// Path to the synthesis script passed to the tool.
    pub script: PathBuf,
}

/// Operating point of the power model.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModelConfig {
    /// Clock frequency, e.g. `"100MHz"` or a bare number in Hz.
    #[serde(
        default = "default_frequency",
        deserialize_with = "deserialize_frequency"
    )]
    pub frequency: Frequency,
    /// Supply voltage in volts.
    #[serde(default = "default_supply_voltage")]
    pub supply_voltage: f64,
    /// Switching activity factor in (0, 1].
    #[serde(default = "default_activity_factor")]
    pub activity_factor: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            supply_voltage: default_supply_voltage(),
            activity_factor: default_activity_factor(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_program() -> String {
    "yosys".to_string()
}

fn default_timeout_secs() -> u64 {
    180
}

fn default_frequency() -> Frequency {
    Frequency::from_mhz(100.0)
}

fn default_supply_voltage() -> f64 {
    1.0
}

fn default_activity_factor() -> f64 {
    0.2
}

/// Classical, Dadda and Wallace with scripts under `synthesis/`.
pub fn default_variants() -> BTreeMap<String, VariantConfig> {
    Variant::KNOWN
        .iter()
        .map(|v| {
            let script = PathBuf::from(format!("synthesis/synthesize_{}.ys", v.file_stem()));
            (v.name().to_string(), VariantConfig { script })
        })
        .collect()
}

/// Deserializes a frequency given either as a unit string or as a number of Hz.
fn deserialize_frequency<'de, D>(deserializer: D) -> Result<Frequency, D::Error>
where
    D: Deserializer<'de>,
{
    struct FrequencyVisitor;

    impl<'de> Visitor<'de> for FrequencyVisitor {
        type Value = Frequency;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a frequency such as \"100MHz\" or a number of Hz")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Frequency::new(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Frequency::new(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Frequency::new(v))
        }
    }

    deserializer.deserialize_any(FrequencyVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = MulscopeConfig::default();
        assert_eq!(config.project.name, "multipliers");
        assert_eq!(config.tool.program, "yosys");
        assert_eq!(config.tool.timeout(), Duration::from_secs(180));
        assert_eq!(config.model.frequency.mhz(), 100.0);
        assert_eq!(
            config.variants["Wallace"].script,
            PathBuf::from("synthesis/synthesize_wallace.ys")
        );
    }

    #[test]
    fn variant_scripts_in_canonical_order() {
        let mut config = MulscopeConfig::default();
        config.variants.insert(
            "Array".to_string(),
            VariantConfig {
                script: PathBuf::from("array.ys"),
            },
        );
        let names: Vec<_> = config
            .variant_scripts()
            .into_iter()
            .map(|(v, _)| v.name().to_string())
            .collect();
        assert_eq!(names, ["Classical", "Dadda", "Wallace", "Array"]);
    }

    #[test]
    fn output_paths() {
        let config = MulscopeConfig::default();
        assert_eq!(
            config.results_file(),
            Path::new("results").join("analysis_results.json")
        );
        assert_eq!(
            config.log_file(&Variant::Dadda),
            Path::new("results").join("dadda_synthesis.log")
        );
    }
}
