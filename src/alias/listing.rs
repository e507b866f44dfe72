//! Listing assembly for the engine inventory view.
//!
//! Minimality is computed per family, so two families can independently
//! settle on the same short alias. This module is the one place that sees
//! the whole listing at once, and it swaps every colliding alias for the
//! owning engine's full alias before anything is shown.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::alias::group::AliasGroup;
use crate::engine::{EngineDescriptor, Selections};

/// One row of the engine inventory listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineListing {
    pub engine: EngineDescriptor,
    /// The alias shown to the user; minimal within the family, full on any
    /// cross-listing collision.
    pub alias: String,
    /// The always-valid fully-qualified alias.
    pub full_alias: String,
    /// Model formats for which this engine is the current selection.
    pub selected_for_formats: Vec<String>,
}

/// Build the full inventory listing: minimal aliases per family, then one
/// global pass replacing any alias string that appears more than once with
/// the colliding engines' full aliases.
pub fn assemble_listing(
    engines: &[EngineDescriptor],
    selections: &Selections,
) -> Vec<EngineListing> {
    let groups = AliasGroup::create_groups(engines);
    let mut rows: Vec<EngineListing> = groups
        .iter()
        .flat_map(|group| group.engines_with_minimal_aliases())
        .map(|entry| EngineListing {
            selected_for_formats: entry.engine.selected_formats(selections),
            engine: entry.engine.clone(),
            alias: entry.minimal_alias.alias,
            full_alias: entry.full_alias.alias,
        })
        .collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for row in &rows {
        *occurrences.entry(row.alias.as_str()).or_insert(0) += 1;
    }
    let colliding: Vec<String> = occurrences
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(alias, _)| alias.to_string())
        .collect();

    if !colliding.is_empty() {
        debug!(?colliding, "replacing colliding listing aliases with full aliases");
        for row in &mut rows {
            if colliding.iter().any(|alias| *alias == row.alias) {
                row.alias = row.full_alias.clone();
            }
        }
    }
    rows
}
