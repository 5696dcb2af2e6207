use crate::core::archive::ArchiveReader;
use crate::core::extractor::extract_records;
use crate::core::table::{write_table, TableRow, BERRY_HEADERS, MUTATION_HEADERS};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Diagnostic, Extraction, RunReport, TableKind, TransformResult};
use crate::utils::error::{EtlError, Result};

/// 從單一 jar 抽出樹果與突變資料並寫成兩張 CSV
pub struct BerryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BerryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn load_table<T: TableRow + Sync>(
        &self,
        table: TableKind,
        path: &str,
        headers: &[&str],
        rows: &[T],
        report: &mut RunReport,
    ) {
        if rows.is_empty() {
            report.diagnostics.push(Diagnostic::EmptyTable { table });
            return;
        }

        match write_table(&self.storage, path, headers, rows).await {
            Ok(count) => {
                tracing::info!("CSV saved: {} ({} rows)", path, count);
                report.outputs.push(path.to_string());
            }
            Err(e) => report.diagnostics.push(Diagnostic::WriteFailed {
                table,
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BerryPipeline<S, C> {
    async fn extract(&self) -> Result<Extraction> {
        let archive_path = self.config.archive_path();
        let mut extraction = Extraction::default();

        let mut reader = match ArchiveReader::open(&archive_path) {
            Ok(reader) => reader.with_prefix(self.config.entry_prefix()),
            Err(EtlError::ArchiveNotFound { path }) => {
                extraction
                    .diagnostics
                    .push(Diagnostic::ArchiveNotFound { path });
                return Ok(extraction);
            }
            Err(e) => return Err(e),
        };

        tracing::info!("Processing archive: {}", archive_path.display());

        for entry in reader.entries() {
            match entry {
                Ok(entry) => extraction.entries.push(entry),
                Err(EtlError::MalformedEntry { entry, reason }) => {
                    extraction.diagnostics.push(Diagnostic::MalformedEntry {
                        entry,
                        archive: archive_path.clone(),
                        reason,
                    })
                }
                Err(e) => return Err(e.with_diagnostics(extraction.diagnostics)),
            }
        }

        tracing::debug!(
            "Read {} berry entries from {}",
            extraction.entries.len(),
            archive_path.display()
        );
        Ok(extraction)
    }

    async fn transform(&self, extraction: Extraction) -> Result<TransformResult> {
        let archive_path = self.config.archive_path();
        let mut result = TransformResult {
            diagnostics: extraction.diagnostics,
            ..Default::default()
        };

        for entry in &extraction.entries {
            match extract_records(entry) {
                Ok((berry, mutations)) => {
                    result.berries.push(berry);
                    result.mutations.extend(mutations);
                }
                Err(EtlError::MalformedEntry { entry, reason }) => {
                    result.diagnostics.push(Diagnostic::MalformedEntry {
                        entry,
                        archive: archive_path.clone(),
                        reason,
                    })
                }
                Err(e) => return Err(e.with_diagnostics(result.diagnostics)),
            }
        }

        // 穩定排序：同一來源樹果的突變維持原本順序
        result
            .mutations
            .sort_by(|a, b| a.source_berry.cmp(&b.source_berry));

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<RunReport> {
        let mut report = RunReport {
            outputs: Vec::new(),
            diagnostics: result.diagnostics,
        };

        // 兩張表互相獨立：一張寫入失敗不影響另一張
        self.load_table(
            TableKind::Berries,
            self.config.berry_table_name(),
            &BERRY_HEADERS,
            &result.berries,
            &mut report,
        )
        .await;

        self.load_table(
            TableKind::Mutations,
            self.config.mutation_table_name(),
            &MUTATION_HEADERS,
            &result.mutations,
            &mut report,
        )
        .await;

        Ok(report)
    }
}
