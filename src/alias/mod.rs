//! Alias vocabulary shared by generation, grouping, and resolution.
//!
//! An alias is a short, human-typable string identifying one or more runtime
//! engine builds, e.g. `llama.cpp-cuda` or `llama.cpp-win-x86_64-cuda-avx2@1.50.2`.

pub mod generator;
pub mod group;
pub mod listing;
pub mod resolver;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::engine::EngineDescriptor;

/// Separator between non-version alias components.
pub const COMPONENT_SEPARATOR: &str = "-";
/// Separator in front of a version suffix, distinct from [`COMPONENT_SEPARATOR`]
/// so the version is visually distinguishable from the rest of the alias.
pub const VERSION_SEPARATOR: &str = "@";
/// Separator between entries of the instruction-set-extensions component.
pub const EXTENSION_SEPARATOR: &str = "_";

/// The descriptive axes an alias can be built from.
///
/// Declaration order is a hard contract: rendering always concatenates
/// components in exactly this sequence, regardless of how a field subset was
/// constructed. `Version` is always rendered last, behind
/// [`VERSION_SEPARATOR`]. The derived `Ord` makes a [`FieldSet`] iterate in
/// rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AliasField {
    Family,
    Platform,
    CpuArchitecture,
    GpuFramework,
    CpuInstructionSetExtensions,
    Version,
}

impl AliasField {
    /// All fields, in rendering order.
    pub const ALL: [AliasField; 6] = [
        AliasField::Family,
        AliasField::Platform,
        AliasField::CpuArchitecture,
        AliasField::GpuFramework,
        AliasField::CpuInstructionSetExtensions,
        AliasField::Version,
    ];
}

/// An ordered subset of alias fields.
pub type FieldSet = BTreeSet<AliasField>;

/// Build a [`FieldSet`] from a slice of fields.
pub fn field_set(fields: &[AliasField]) -> FieldSet {
    fields.iter().copied().collect()
}

/// An alias string together with the fields it was built from.
///
/// Two built aliases are interchangeable for conflict checking only when
/// both the string and the field set match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltAlias {
    pub alias: String,
    pub fields: FieldSet,
}

impl BuiltAlias {
    pub fn new<S: Into<String>>(alias: S, fields: FieldSet) -> Self {
        BuiltAlias {
            alias: alias.into(),
            fields,
        }
    }

    /// True when the alias pins a concrete version.
    pub fn is_version_qualified(&self) -> bool {
        self.fields.contains(&AliasField::Version)
    }
}

/// The canonical `name-version` alias for an engine build.
///
/// (`name`, `version`) is a unique key over any engine list, so the full
/// alias is globally unique and always resolvable. It is the fallback
/// whenever a shorter alias would be ambiguous. Its field set is exactly
/// `{Version}`.
pub fn full_alias(engine: &EngineDescriptor) -> BuiltAlias {
    BuiltAlias::new(
        format!("{}{}{}", engine.name, COMPONENT_SEPARATOR, engine.version),
        field_set(&[AliasField::Version]),
    )
}
