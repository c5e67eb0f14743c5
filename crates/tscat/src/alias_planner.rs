//! Canonical alias planning
//!
//! Aggregates the namespace-import observations from every file, groups
//! them by resolved target, and picks one canonical alias per target. The
//! redirect table maps every observed alias to its target's canonical
//! form; canonical aliases map to themselves, which makes applying the
//! table idempotent.

use std::path::PathBuf;

use crate::types::{FxIndexMap, FxIndexSet};

/// The plan produced from all namespace-import observations
#[derive(Debug, Default)]
pub struct AliasPlan {
    /// Every observed alias -> canonical alias for its target
    pub redirects: FxIndexMap<String, String>,
    /// Canonical alias -> the target file it represents
    pub canonical_to_target: FxIndexMap<String, PathBuf>,
}

impl AliasPlan {
    /// Canonical alias names in sorted order, the order declarations and
    /// import lists are emitted in
    pub fn sorted_canonical_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .canonical_to_target
            .keys()
            .map(String::as_str)
            .collect();
        aliases.sort_unstable();
        aliases
    }
}

/// Choose the canonical alias for one target: shortest string, then
/// lexicographically smallest. A deterministic total order over the set.
fn choose_canonical<'a>(aliases: &'a FxIndexSet<String>) -> Option<&'a str> {
    aliases
        .iter()
        .map(String::as_str)
        .min_by_key(|alias| (alias.len(), *alias))
}

/// Build the alias plan from all observed namespace imports.
///
/// When the same alias string is independently claimed by two different
/// canonical targets, the first registration wins and the conflict is
/// logged. That first-wins behavior is deliberate.
pub fn plan_aliases(
    namespace_imports: &FxIndexMap<PathBuf, FxIndexMap<String, PathBuf>>,
) -> AliasPlan {
    log::info!("Analyzing namespace imports...");

    let mut target_to_aliases: FxIndexMap<&PathBuf, FxIndexSet<String>> = FxIndexMap::default();
    for imports in namespace_imports.values() {
        for (alias, target) in imports {
            target_to_aliases
                .entry(target)
                .or_default()
                .insert(alias.clone());
        }
    }

    let mut plan = AliasPlan::default();
    let mut unified_count = 0usize;
    log::debug!("Assigning canonical aliases...");
    for (target, aliases) in &target_to_aliases {
        let Some(canonical) = choose_canonical(aliases) else {
            continue;
        };
        plan.canonical_to_target
            .insert(canonical.to_string(), (*target).clone());
        for alias in aliases {
            if let Some(existing) = plan.redirects.get(alias) {
                if existing != canonical {
                    log::warn!("Alias conflict for '{alias}'");
                }
            } else {
                plan.redirects.insert(alias.clone(), canonical.to_string());
                if alias != canonical {
                    unified_count += 1;
                }
            }
        }
    }

    log::info!(
        "Alias analysis complete. Found {} unique namespace targets.",
        plan.canonical_to_target.len()
    );
    if unified_count > 0 {
        log::info!("Unified {unified_count} non-canonical aliases.");
    }
    plan
}
