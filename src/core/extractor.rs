use crate::core::archive::JSON_SUFFIX;
use crate::core::normalize::{format_biome_tag, format_identifier, format_mulch};
use crate::domain::model::{BerryRecord, MutationRecord, RawBerryDefinition, RawEntry};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

/// `data/cobblemon/berries/cobblemon/cheri_berry.json` -> `Cheri Berry`
pub fn berry_name_from_path(path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or(path);
    let stem = basename.strip_suffix(JSON_SUFFIX).unwrap_or(basename);
    format_identifier(stem)
}

/// 一個條目產生一筆樹果資料，以及 `mutations` 中每組配對各一筆突變資料
pub fn extract_records(entry: &RawEntry) -> Result<(BerryRecord, Vec<MutationRecord>)> {
    let raw = RawBerryDefinition::deserialize_from(&entry.path, &entry.document)?;
    let name = berry_name_from_path(&entry.path);

    let mut mutations = Vec::with_capacity(raw.mutations.len());
    for (other, result) in &raw.mutations {
        let result = result.as_str().ok_or_else(|| EtlError::MalformedEntry {
            entry: entry.path.clone(),
            reason: format!("mutation result for '{}' is not a string", other),
        })?;

        mutations.push(MutationRecord {
            source_berry: name.clone(),
            other_berry: format_identifier(other),
            result_berry: format_identifier(result),
        });
    }

    let berry = BerryRecord {
        name,
        preferred_biomes: raw
            .preferred_biome_tags
            .iter()
            .map(|tag| format_biome_tag(tag))
            .collect(),
        favorite_mulches: raw
            .favorite_mulches
            .iter()
            .map(|mulch| format_mulch(mulch))
            .collect(),
    };

    Ok((berry, mutations))
}

impl RawBerryDefinition {
    fn deserialize_from(entry: &str, document: &serde_json::Value) -> Result<Self> {
        Self::deserialize(document).map_err(|e| EtlError::MalformedEntry {
            entry: entry.to_string(),
            reason: e.to_string(),
        })
    }
}
