//! Descriptors for installed runtime engine builds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The mapping from model-format identifier to the engine currently selected
/// for that format. Supplied by the selection store; consumed read-only.
pub type Selections = HashMap<String, EngineDescriptor>;

/// One installed or available runtime engine build.
///
/// The pair (`name`, `version`) uniquely identifies a build within any engine
/// list this crate is handed. `version` is ordered by
/// [`crate::version::compare_versions`], not lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDescriptor {
    /// Stable identifier of the build, e.g. `llama.cpp-win-x86_64-nvidia-cuda-avx2`.
    pub name: String,
    /// Build version, e.g. `1.50.2`.
    pub version: String,
    /// Engine implementation family, e.g. `llama.cpp` or `mlx-llm`.
    pub family: String,
    /// Operating system platform, e.g. `win`, `mac`, `linux`.
    pub platform: String,
    /// CPU architecture, e.g. `x86_64`, `arm64`.
    pub cpu_architecture: String,
    /// CPU instruction-set extensions the build was compiled for. May be empty.
    #[serde(default)]
    pub cpu_instruction_set_extensions: Vec<String>,
    /// GPU framework the build targets. `None` means the build is CPU-only.
    #[serde(default)]
    pub gpu_framework: Option<String>,
    /// Model formats this build can run, e.g. `gguf`, `safetensors`. Non-empty.
    pub supported_model_formats: Vec<String>,
}

impl EngineDescriptor {
    /// Check whether this build can run every one of the given model formats.
    pub fn supports_all_formats(&self, formats: &[String]) -> bool {
        formats.iter().all(|wanted| {
            self.supported_model_formats
                .iter()
                .any(|have| have.eq_ignore_ascii_case(wanted))
        })
    }

    /// The model formats for which this engine is the current selection.
    pub fn selected_formats(&self, selections: &Selections) -> Vec<String> {
        let mut formats: Vec<String> = selections
            .iter()
            .filter(|(_, engine)| engine.name == self.name && engine.version == self.version)
            .map(|(format, _)| format.clone())
            .collect();
        formats.sort();
        formats
    }
}
