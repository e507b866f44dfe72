//! Runtime engine alias generation and resolution.
//!
//! Turns a structured description of an installed inference engine build
//! (family, platform, CPU architecture, GPU framework, instruction-set
//! extensions, version) into a short, human-typable alias, and resolves a
//! user-typed alias back to the exact matching build(s) with deterministic
//! handling of ambiguity, missing data, and naming collisions.
//!
//! All state is rebuilt per call from a caller-supplied engine snapshot;
//! nothing is cached between calls.

pub mod alias;
pub mod engine;
pub mod error;
pub mod version;

// Re-export commonly used types
pub use alias::generator::AliasGenerator;
pub use alias::group::AliasGroup;
pub use alias::listing::{assemble_listing, EngineListing};
pub use alias::resolver::{
    ensure_not_version_qualified, resolve_alias, resolve_alias_for_model_formats,
    resolve_latest_alias, resolve_unique_alias, ResolvedAlias,
};
pub use alias::{full_alias, AliasField, BuiltAlias, FieldSet};
pub use engine::{EngineDescriptor, Selections};
pub use error::{AliasError, Result};
