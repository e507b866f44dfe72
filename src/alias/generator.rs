//! Alias rendering and per-family candidate enumeration.
//!
//! Each engine family gets a generator strategy: the list of component
//! subsets worth trying for that family (least to most specific) and,
//! optionally, a public display name replacing the internal family
//! identifier. Strategies are looked up by family, with a generic fallback
//! for families this build has never heard of.

use crate::alias::{
    field_set, AliasField, BuiltAlias, FieldSet, COMPONENT_SEPARATOR, EXTENSION_SEPARATOR,
    VERSION_SEPARATOR,
};
use crate::engine::EngineDescriptor;
use crate::error::{AliasError, Result};

/// Internal family identifier of llama.cpp engine builds.
pub const LLAMA_CPP_FAMILY: &str = "llama.cpp";
/// Internal family identifier of MLX engine builds.
pub const MLX_FAMILY: &str = "mlx-llm";
/// Public display name MLX builds are aliased under.
pub const MLX_DISPLAY_NAME: &str = "mlx-engine";

/// Replaces the internal family identifier with a public name, and rejects
/// engines of any other family.
#[derive(Debug, Clone, Copy)]
struct FamilyRemap {
    expected_family: &'static str,
    display_name: &'static str,
}

/// Renders alias strings for one engine family and enumerates the component
/// subsets worth trying for it.
#[derive(Debug, Clone)]
pub struct AliasGenerator {
    base_sets: Vec<FieldSet>,
    remap: Option<FamilyRemap>,
}

impl AliasGenerator {
    /// Look up the generator strategy for an engine family.
    pub fn for_family(family: &str) -> Self {
        match family {
            // llama.cpp ships CPU and GPU builds side by side, so every
            // alias must say which one it is: the GPU framework component is
            // forced into every subset and the family-only alias is omitted.
            LLAMA_CPP_FAMILY => AliasGenerator {
                base_sets: Self::growth_sequence(true),
                remap: None,
            },
            MLX_FAMILY => AliasGenerator {
                base_sets: Self::growth_sequence(false),
                remap: Some(FamilyRemap {
                    expected_family: MLX_FAMILY,
                    display_name: MLX_DISPLAY_NAME,
                }),
            },
            _ => AliasGenerator {
                base_sets: Self::growth_sequence(false),
                remap: None,
            },
        }
    }

    /// The default subset-growth sequence. Growth order adds the GPU
    /// framework before platform and architecture; rendering order stays the
    /// fixed [`AliasField`] order regardless.
    fn growth_sequence(force_gpu_framework: bool) -> Vec<FieldSet> {
        let mut sets = vec![
            field_set(&[AliasField::Family]),
            field_set(&[AliasField::Family, AliasField::GpuFramework]),
            field_set(&[
                AliasField::Family,
                AliasField::GpuFramework,
                AliasField::Platform,
            ]),
            field_set(&[
                AliasField::Family,
                AliasField::GpuFramework,
                AliasField::Platform,
                AliasField::CpuArchitecture,
            ]),
            field_set(&[
                AliasField::Family,
                AliasField::GpuFramework,
                AliasField::Platform,
                AliasField::CpuArchitecture,
                AliasField::CpuInstructionSetExtensions,
            ]),
        ];
        if force_gpu_framework {
            sets.retain(|set| set.contains(&AliasField::GpuFramework));
        }
        sets
    }

    /// The unversioned component subsets to try, least specific first.
    pub fn base_alias_component_sets(&self) -> &[FieldSet] {
        &self.base_sets
    }

    /// Every base subset, each followed by its version-suffixed variant.
    pub fn alias_component_sets(&self) -> Vec<FieldSet> {
        let mut sets = Vec::with_capacity(self.base_sets.len() * 2);
        for base in &self.base_sets {
            sets.push(base.clone());
            if !base.contains(&AliasField::Version) {
                let mut versioned = base.clone();
                versioned.insert(AliasField::Version);
                sets.push(versioned);
            }
        }
        sets
    }

    /// The family name an alias shows for this engine.
    ///
    /// Panics if a remapping strategy receives an engine outside its family;
    /// that is a wiring bug in group construction, never a user condition.
    fn family_display_name<'a>(&'a self, engine: &'a EngineDescriptor) -> &'a str {
        match self.remap {
            Some(remap) => {
                if engine.family != remap.expected_family {
                    panic!(
                        "alias generator for family '{}' received engine '{}' of family '{}'",
                        remap.expected_family, engine.name, engine.family
                    );
                }
                remap.display_name
            }
            None => &engine.family,
        }
    }

    /// Render the alias string for one engine and one requested field subset.
    ///
    /// Components appear in the fixed [`AliasField`] order, lower-cased and
    /// joined with [`COMPONENT_SEPARATOR`]; a requested version goes last
    /// behind [`VERSION_SEPARATOR`]. Requesting instruction-set extensions
    /// the engine does not have is the recoverable missing-component error.
    pub fn build_alias_string(&self, engine: &EngineDescriptor, fields: &FieldSet) -> Result<String> {
        let mut components: Vec<String> = Vec::with_capacity(fields.len());
        for field in AliasField::ALL {
            if !fields.contains(&field) {
                continue;
            }
            match field {
                AliasField::Family => {
                    components.push(self.family_display_name(engine).to_lowercase());
                }
                AliasField::Platform => components.push(engine.platform.to_lowercase()),
                AliasField::CpuArchitecture => {
                    components.push(engine.cpu_architecture.to_lowercase());
                }
                AliasField::GpuFramework => {
                    let framework = engine.gpu_framework.as_deref().unwrap_or("cpu");
                    components.push(framework.to_lowercase());
                }
                AliasField::CpuInstructionSetExtensions => {
                    if engine.cpu_instruction_set_extensions.is_empty() {
                        return Err(AliasError::MissingComponent(
                            AliasField::CpuInstructionSetExtensions,
                        ));
                    }
                    components.push(
                        engine
                            .cpu_instruction_set_extensions
                            .join(EXTENSION_SEPARATOR)
                            .to_lowercase(),
                    );
                }
                // Rendered after the loop, behind its own separator.
                AliasField::Version => {}
            }
        }

        let mut alias = components.join(COMPONENT_SEPARATOR);
        if fields.contains(&AliasField::Version) {
            alias.push_str(VERSION_SEPARATOR);
            alias.push_str(&engine.version);
        }
        Ok(alias)
    }

    /// Render one candidate alias, or `None` when a requested component is
    /// missing on this engine. Callers drop the candidate and move on.
    pub fn generate_alias(&self, engine: &EngineDescriptor, fields: FieldSet) -> Option<BuiltAlias> {
        match self.build_alias_string(engine, &fields) {
            Ok(alias) => Some(BuiltAlias::new(alias, fields)),
            Err(err) => {
                tracing::trace!(
                    engine = %engine.name,
                    %err,
                    "dropping alias candidate with missing component"
                );
                None
            }
        }
    }

    /// Every candidate alias for this engine, least specific first.
    pub fn generate_all_aliases(&self, engine: &EngineDescriptor) -> Vec<BuiltAlias> {
        self.alias_component_sets()
            .into_iter()
            .filter_map(|fields| self.generate_alias(engine, fields))
            .collect()
    }
}
