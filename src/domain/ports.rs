use crate::domain::model::{Extraction, RunReport, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// 要讀取的 jar/zip 完整路徑
    fn archive_path(&self) -> PathBuf;
    fn entry_prefix(&self) -> &str;
    fn berry_table_name(&self) -> &str;
    fn mutation_table_name(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extraction>;
    async fn transform(&self, extraction: Extraction) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RunReport>;
}
