use crate::utils::error::ErrorSeverity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 一筆樹果屬性資料，對應樹果表的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BerryRecord {
    pub name: String,
    pub preferred_biomes: Vec<String>,
    pub favorite_mulches: Vec<String>,
}

/// 一組突變關係：`source_berry` 與 `other_berry` 種在一起會長出 `result_berry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationRecord {
    pub source_berry: String,
    pub other_berry: String,
    pub result_berry: String,
}

/// 壓縮檔內樹果 JSON 的原始形狀，所有欄位皆可省略
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBerryDefinition {
    pub preferred_biome_tags: Vec<String>,
    pub favorite_mulches: Vec<String>,
    pub mutations: serde_json::Map<String, serde_json::Value>,
}

/// 從壓縮檔讀出的一個 JSON 條目
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub path: String,
    pub document: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Berries,
    Mutations,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Berries => write!(f, "berry"),
            TableKind::Mutations => write!(f, "mutation"),
        }
    }
}

/// 執行過程中可恢復的狀況，由報告層輸出到主控台與日誌
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    ArchiveNotFound { path: PathBuf },
    MalformedEntry { entry: String, archive: PathBuf, reason: String },
    EmptyTable { table: TableKind },
    WriteFailed { table: TableKind, path: String, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Diagnostic::ArchiveNotFound { .. } | Diagnostic::WriteFailed { .. } => {
                ErrorSeverity::High
            }
            Diagnostic::MalformedEntry { .. } | Diagnostic::EmptyTable { .. } => {
                ErrorSeverity::Low
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ArchiveNotFound { path } => {
                write!(f, "Target JAR not found: {}", path.display())
            }
            Diagnostic::MalformedEntry {
                entry,
                archive,
                reason,
            } => write!(
                f,
                "Failed to parse {} in {}: {}",
                entry,
                archive.display(),
                reason
            ),
            Diagnostic::EmptyTable { table } => write!(f, "No {} data extracted!", table),
            Diagnostic::WriteFailed {
                table,
                path,
                reason,
            } => write!(f, "Failed to write {} table to {}: {}", table, path, reason),
        }
    }
}

/// extract 階段的結果
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub entries: Vec<RawEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub berries: Vec<BerryRecord>,
    pub mutations: Vec<MutationRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// 整次執行的摘要：寫出的檔案與所有診斷
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outputs: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn worst_severity(&self) -> ErrorSeverity {
        self.diagnostics
            .iter()
            .map(Diagnostic::severity)
            .max()
            .unwrap_or(ErrorSeverity::Low)
    }

    pub fn exit_code(&self) -> i32 {
        self.worst_severity().exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_definition_defaults_when_fields_absent() {
        let raw: RawBerryDefinition = serde_json::from_str("{}").unwrap();
        assert!(raw.preferred_biome_tags.is_empty());
        assert!(raw.favorite_mulches.is_empty());
        assert!(raw.mutations.is_empty());
    }

    #[test]
    fn test_raw_definition_keeps_mutation_order() {
        let raw: RawBerryDefinition = serde_json::from_str(
            r#"{"mutations": {"cobblemon:pecha_berry": "cobblemon:wiki_berry", "cobblemon:aspear_berry": "cobblemon:mago_berry"}}"#,
        )
        .unwrap();
        let keys: Vec<&String> = raw.mutations.keys().collect();
        assert_eq!(keys, vec!["cobblemon:pecha_berry", "cobblemon:aspear_berry"]);
    }

    #[test]
    fn test_report_exit_code_follows_worst_diagnostic() {
        let mut report = RunReport::default();
        assert_eq!(report.exit_code(), 0);

        report.diagnostics.push(Diagnostic::EmptyTable {
            table: TableKind::Mutations,
        });
        assert_eq!(report.exit_code(), 0);

        report.diagnostics.push(Diagnostic::ArchiveNotFound {
            path: PathBuf::from("zip_archives/missing.jar"),
        });
        assert_eq!(report.exit_code(), 1);
    }
}
