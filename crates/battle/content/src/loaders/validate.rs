//! Cross-reference checks between catalogs.
//!
//! Catalogs load independently, so a skill can name a status nobody
//! defined. The engine reports such ids as contract errors mid-battle;
//! these checks surface them at load time instead.

use battle_core::{ContentTables, ItemEffect, StatusApplication};

use crate::loaders::{Encounter, LoadResult};

/// Every status referenced by a skill or item exists.
pub fn validate_tables(tables: &ContentTables) -> LoadResult<()> {
    let mut missing = Vec::new();

    let skill_refs = tables
        .skills
        .values()
        .flat_map(|skill| skill.statuses.iter().map(move |a| (skill.id.as_str(), a)));
    let item_refs = tables.items.values().flat_map(|item| {
        item.effects.iter().filter_map(move |effect| match effect {
            ItemEffect::ApplyStatus(application) => Some((item.id.as_str(), application)),
            _ => None,
        })
    });

    for (owner, application) in skill_refs.chain(item_refs) {
        if !known_status(tables, application) {
            missing.push(format!("{owner} -> {}", application.status));
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("unknown statuses referenced: {}", missing.join(", "))
    }
}

/// Every skill a combatant knows exists.
pub fn validate_encounter(encounter: &Encounter, tables: &ContentTables) -> LoadResult<()> {
    let missing: Vec<String> = encounter
        .combatants
        .iter()
        .flat_map(|spec| {
            spec.skills
                .iter()
                .filter(|skill| !tables.skills.contains_key(*skill))
                .map(move |skill| format!("{} -> {}", spec.name, skill))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        anyhow::bail!(
            "encounter '{}' references unknown skills: {}",
            encounter.name,
            missing.join(", ")
        )
    }
}

fn known_status(tables: &ContentTables, application: &StatusApplication) -> bool {
    tables.statuses.contains_key(&application.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{SkillDefinition, SkillKind};

    #[test]
    fn dangling_status_is_reported() {
        let tables = ContentTables::new().with_skill(
            SkillDefinition::new("venom", "Venom", SkillKind::Support)
                .with_status(StatusApplication::new("poison")),
        );

        let err = validate_tables(&tables).unwrap_err();
        assert!(err.to_string().contains("venom -> poison"));
    }
}
