//! Cross-family alias resolution.
//!
//! Groups are rebuilt from the caller's engine snapshot on every call; each
//! resolution is a pure function of its inputs.

use tracing::debug;

use crate::alias::group::AliasGroup;
use crate::alias::{full_alias, AliasField, FieldSet};
use crate::engine::EngineDescriptor;
use crate::error::{AliasError, Result};
use crate::version::compare_versions;

/// The outcome of resolving an alias: every matching engine, plus the field
/// set the alias was built from.
#[derive(Debug, Clone)]
pub struct ResolvedAlias {
    pub engines: Vec<EngineDescriptor>,
    pub fields: FieldSet,
}

/// Resolve an alias against every family group and union the matches.
///
/// Fails with [`AliasError::NotFound`] when nothing matches. Panics if two
/// matches carry the same alias string built from different field sets;
/// generation guarantees that never happens, so a mismatch is a bug to
/// surface, not a reading to pick from.
pub fn resolve_alias(engines: &[EngineDescriptor], alias: &str) -> Result<ResolvedAlias> {
    let groups = AliasGroup::create_groups(engines);
    let mut matched_engines: Vec<EngineDescriptor> = Vec::new();
    let mut fields: Option<FieldSet> = None;

    for group in &groups {
        for (engine, built) in group.resolve(alias) {
            match &fields {
                None => fields = Some(built.fields.clone()),
                Some(expected) => {
                    if *expected != built.fields {
                        panic!(
                            "alias '{}' was generated from two different field sets ({:?} and {:?})",
                            alias, expected, built.fields
                        );
                    }
                }
            }
            matched_engines.push(engine.clone());
        }
    }

    match fields {
        Some(fields) => {
            debug!(alias, matches = matched_engines.len(), "resolved alias");
            Ok(ResolvedAlias {
                engines: matched_engines,
                fields,
            })
        }
        None => Err(AliasError::not_found(alias)),
    }
}

/// Resolve an alias, keeping only engines that support **every** requested
/// model format. An empty format list applies no filter.
pub fn resolve_alias_for_model_formats(
    engines: &[EngineDescriptor],
    alias: &str,
    required_formats: &[String],
) -> Result<ResolvedAlias> {
    let mut resolved = resolve_alias(engines, alias)?;
    if required_formats.is_empty() {
        return Ok(resolved);
    }
    resolved
        .engines
        .retain(|engine| engine.supports_all_formats(required_formats));
    if resolved.engines.is_empty() {
        return Err(AliasError::IncompatibleFormats {
            alias: alias.to_string(),
            formats: required_formats.to_vec(),
        });
    }
    Ok(resolved)
}

/// Resolve an alias that must identify exactly one engine.
///
/// Used by select/remove operations. On ambiguity the error lists every
/// candidate's full alias so the user can retype a fully-qualified one.
pub fn resolve_unique_alias(
    engines: &[EngineDescriptor],
    alias: &str,
    required_formats: &[String],
) -> Result<(EngineDescriptor, FieldSet)> {
    let mut resolved = resolve_alias_for_model_formats(engines, alias, required_formats)?;
    if resolved.engines.len() > 1 {
        let candidates = resolved
            .engines
            .iter()
            .map(|engine| full_alias(engine).alias)
            .collect();
        return Err(AliasError::ambiguous(alias, candidates));
    }
    let engine = resolved.engines.remove(0);
    Ok((engine, resolved.fields))
}

/// Resolve an alias to the newest version of a single engine name.
///
/// All matches must share one `name`; two different names cannot be ordered
/// against each other. Callers in "latest" mode must first reject
/// version-qualified aliases via [`ensure_not_version_qualified`].
pub fn resolve_latest_alias(
    engines: &[EngineDescriptor],
    alias: &str,
    required_formats: &[String],
) -> Result<(EngineDescriptor, FieldSet)> {
    let resolved = resolve_alias_for_model_formats(engines, alias, required_formats)?;

    let mut names: Vec<String> = resolved
        .engines
        .iter()
        .map(|engine| engine.name.clone())
        .collect();
    names.sort();
    names.dedup();
    if names.len() > 1 {
        return Err(AliasError::CannotDisambiguateNames {
            alias: alias.to_string(),
            names,
        });
    }

    let latest = resolved
        .engines
        .into_iter()
        .max_by(|a, b| compare_versions(&a.version, &b.version))
        .expect("resolve_alias never returns an empty match set");
    debug!(alias, engine = %latest.name, version = %latest.version, "picked latest version");
    Ok((latest, resolved.fields))
}

/// Reject a version-qualified alias in latest-version mode: pinning a
/// version and asking for the latest one at the same time is a
/// contradiction.
pub fn ensure_not_version_qualified(alias: &str, fields: &FieldSet) -> Result<()> {
    if fields.contains(&AliasField::Version) {
        return Err(AliasError::VersionQualifiedLatest {
            alias: alias.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::field_set;

    fn engine(name: &str, version: &str, family: &str, gpu: Option<&str>) -> EngineDescriptor {
        EngineDescriptor {
            name: name.to_string(),
            version: version.to_string(),
            family: family.to_string(),
            platform: "linux".to_string(),
            cpu_architecture: "x86_64".to_string(),
            cpu_instruction_set_extensions: vec![],
            gpu_framework: gpu.map(|s| s.to_string()),
            supported_model_formats: vec!["gguf".to_string()],
        }
    }

    #[test]
    fn test_resolve_alias_not_found() {
        let engines = vec![engine("a", "1.0.0", "llama.cpp", None)];
        let err = resolve_alias(&engines, "no-such-engine").unwrap_err();
        assert_eq!(err, AliasError::not_found("no-such-engine"));
    }

    #[test]
    fn test_resolve_alias_unions_across_versions() {
        let engines = vec![
            engine("a", "1.0.0", "llama.cpp", Some("cuda")),
            engine("a", "1.1.0", "llama.cpp", Some("cuda")),
        ];
        let resolved = resolve_alias(&engines, "llama.cpp-cuda").unwrap();
        assert_eq!(resolved.engines.len(), 2);
        assert!(!resolved.fields.contains(&AliasField::Version));
    }

    #[test]
    #[should_panic(expected = "two different field sets")]
    fn test_same_alias_from_two_field_sets_aborts() {
        // One engine's full alias string equals another family's
        // family-only alias, so the same string carries {Version} in one
        // match and {Family} in the other.
        let engines = vec![
            engine("x", "1.0.0", "llama.cpp", Some("cuda")),
            engine("weird", "0.1.0", "x-1.0.0", None),
        ];
        let _ = resolve_alias(&engines, "x-1.0.0");
    }

    #[test]
    fn test_format_filter_requires_every_format() {
        let mut cuda = engine("a", "1.0.0", "llama.cpp", Some("cuda"));
        cuda.supported_model_formats = vec!["gguf".to_string(), "safetensors".to_string()];
        let engines = vec![cuda];

        assert!(resolve_alias_for_model_formats(
            &engines,
            "llama.cpp-cuda",
            &["gguf".to_string(), "safetensors".to_string()]
        )
        .is_ok());

        let err = resolve_alias_for_model_formats(
            &engines,
            "llama.cpp-cuda",
            &["gguf".to_string(), "onnx".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, AliasError::IncompatibleFormats { .. }));
    }

    #[test]
    fn test_unique_resolution_rejects_ambiguity_with_full_aliases() {
        let engines = vec![
            engine("a", "1.0.0", "llama.cpp", Some("cuda")),
            engine("a", "1.1.0", "llama.cpp", Some("cuda")),
        ];
        let err = resolve_unique_alias(&engines, "llama.cpp-cuda", &[]).unwrap_err();
        assert_eq!(
            err,
            AliasError::ambiguous(
                "llama.cpp-cuda",
                vec!["a-1.0.0".to_string(), "a-1.1.0".to_string()]
            )
        );

        let (unique, fields) =
            resolve_unique_alias(&engines, "llama.cpp-cuda@1.1.0", &[]).unwrap();
        assert_eq!(unique.version, "1.1.0");
        assert!(fields.contains(&AliasField::Version));
    }

    #[test]
    fn test_latest_resolution_picks_newest_version() {
        let engines = vec![
            engine("a", "1.9.0", "llama.cpp", Some("cuda")),
            engine("a", "1.10.0", "llama.cpp", Some("cuda")),
        ];
        let (latest, _) = resolve_latest_alias(&engines, "llama.cpp-cuda", &[]).unwrap();
        assert_eq!(latest.version, "1.10.0");
    }

    #[test]
    fn test_latest_resolution_rejects_mixed_names() {
        // Same family and alias shape, two distinct build names.
        let mut win = engine("llama.cpp-win-cuda", "1.0.0", "llama.cpp", Some("cuda"));
        win.platform = "win".to_string();
        let engines = vec![
            engine("llama.cpp-linux-cuda", "1.0.0", "llama.cpp", Some("cuda")),
            win,
        ];
        let err = resolve_latest_alias(&engines, "llama.cpp-cuda", &[]).unwrap_err();
        assert!(matches!(err, AliasError::CannotDisambiguateNames { .. }));
    }

    #[test]
    fn test_version_qualified_alias_conflicts_with_latest_mode() {
        let fields = field_set(&[AliasField::Family, AliasField::Version]);
        let err = ensure_not_version_qualified("llama.cpp@1.0.0", &fields).unwrap_err();
        assert!(matches!(err, AliasError::VersionQualifiedLatest { .. }));

        let fields = field_set(&[AliasField::Family]);
        assert!(ensure_not_version_qualified("llama.cpp", &fields).is_ok());
    }
}
