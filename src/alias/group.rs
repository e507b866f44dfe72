//! Per-family alias grouping, minimality, and in-group resolution.
//!
//! A group is rebuilt from the caller's engine snapshot on every call and
//! never cached: its minimum-components set is only meaningful for the exact
//! membership it was computed from.

use tracing::debug;

use crate::alias::generator::AliasGenerator;
use crate::alias::{field_set, full_alias, AliasField, BuiltAlias, FieldSet, EXTENSION_SEPARATOR};
use crate::engine::EngineDescriptor;

/// The engines of one family, with the derived minimum set of fields needed
/// to tell them apart and the family's generator strategy.
#[derive(Debug)]
pub struct AliasGroup<'a> {
    family: String,
    engines: Vec<&'a EngineDescriptor>,
    generator: AliasGenerator,
    minimum_components: FieldSet,
}

/// One engine paired with its display alias and its full-alias fallback.
#[derive(Debug, Clone)]
pub struct MinimalAliasEntry<'a> {
    pub engine: &'a EngineDescriptor,
    pub minimal_alias: BuiltAlias,
    pub full_alias: BuiltAlias,
}

/// True when the given values differ across members, comparing
/// case-insensitively. Identical values in different cases are no variation.
pub fn has_variation<I, S>(values: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = values.into_iter().map(|v| v.as_ref().to_lowercase());
    match normalized.next() {
        Some(first) => normalized.any(|value| value != first),
        None => false,
    }
}

/// Instruction-set lists compare as their sorted, joined contents so the
/// order extensions were reported in never counts as variation.
fn normalized_extensions(engine: &EngineDescriptor) -> String {
    let mut extensions: Vec<String> = engine
        .cpu_instruction_set_extensions
        .iter()
        .map(|ext| ext.to_lowercase())
        .collect();
    extensions.sort();
    extensions.join(EXTENSION_SEPARATOR)
}

impl<'a> AliasGroup<'a> {
    /// Partition engines by family, preserving first-seen family order.
    pub fn create_groups(engines: &'a [EngineDescriptor]) -> Vec<AliasGroup<'a>> {
        let mut groups: Vec<AliasGroup<'a>> = Vec::new();
        for engine in engines {
            match groups.iter_mut().find(|group| group.family == engine.family) {
                Some(group) => group.engines.push(engine),
                None => groups.push(AliasGroup {
                    family: engine.family.clone(),
                    engines: vec![engine],
                    generator: AliasGenerator::for_family(&engine.family),
                    minimum_components: FieldSet::new(),
                }),
            }
        }
        for group in &mut groups {
            group.minimum_components = Self::compute_minimum_components(&group.engines);
        }
        debug!(
            engines = engines.len(),
            families = groups.len(),
            "partitioned engines into alias groups"
        );
        groups
    }

    /// The fields whose values vary across the group's members, plus
    /// `Version`, which every display alias carries even in a singleton
    /// group. An empty group defaults to `{Version}`.
    fn compute_minimum_components(engines: &[&EngineDescriptor]) -> FieldSet {
        let mut minimum = field_set(&[AliasField::Version]);
        if engines.is_empty() {
            return minimum;
        }

        let varying: [(AliasField, Vec<String>); 5] = [
            (
                AliasField::Family,
                engines.iter().map(|e| e.family.clone()).collect(),
            ),
            (
                AliasField::Platform,
                engines.iter().map(|e| e.platform.clone()).collect(),
            ),
            (
                AliasField::CpuArchitecture,
                engines.iter().map(|e| e.cpu_architecture.clone()).collect(),
            ),
            (
                AliasField::GpuFramework,
                engines
                    .iter()
                    .map(|e| e.gpu_framework.clone().unwrap_or_else(|| "cpu".to_string()))
                    .collect(),
            ),
            (
                AliasField::CpuInstructionSetExtensions,
                engines.iter().map(|e| normalized_extensions(e)).collect(),
            ),
        ];
        for (field, values) in varying {
            if has_variation(&values) {
                minimum.insert(field);
            }
        }
        minimum
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn engines(&self) -> &[&'a EngineDescriptor] {
        &self.engines
    }

    pub fn minimum_components(&self) -> &FieldSet {
        &self.minimum_components
    }

    /// Pick the shortest candidate whose field set covers the group's
    /// minimum components. `None` means the caller falls back to the full
    /// alias.
    pub fn select_minimal_alias(&self, candidates: &[BuiltAlias]) -> Option<BuiltAlias> {
        let mut ordered: Vec<&BuiltAlias> = candidates.iter().collect();
        ordered.sort_by_key(|candidate| candidate.fields.len());
        ordered
            .into_iter()
            .find(|candidate| candidate.fields.is_superset(&self.minimum_components))
            .cloned()
    }

    /// Every (engine, alias) pair in this group whose alias string equals
    /// the target. An unversioned alias may legitimately match several
    /// versions of the same build; disambiguation is the caller's decision.
    pub fn resolve(&self, target: &str) -> Vec<(&'a EngineDescriptor, BuiltAlias)> {
        let mut matches = Vec::new();
        for engine in &self.engines {
            let mut candidates = self.generator.generate_all_aliases(engine);
            candidates.push(full_alias(engine));
            for candidate in candidates {
                if candidate.alias == target {
                    matches.push((*engine, candidate));
                }
            }
        }
        matches
    }

    /// Pair every member with its minimal display alias (or its full alias
    /// when no candidate covers the minimum components) and its full alias.
    pub fn engines_with_minimal_aliases(&self) -> Vec<MinimalAliasEntry<'a>> {
        self.engines
            .iter()
            .map(|&engine| {
                let candidates = self.generator.generate_all_aliases(engine);
                let full = full_alias(engine);
                let minimal_alias = self
                    .select_minimal_alias(&candidates)
                    .unwrap_or_else(|| full.clone());
                MinimalAliasEntry {
                    engine,
                    minimal_alias,
                    full_alias: full,
                }
            })
            .collect()
    }
}
