pub mod cli;
pub mod file_config;

use crate::core::archive::BERRY_ENTRY_PREFIX;
use crate::core::ConfigProvider;
use file_config::FileConfig;
use std::path::{Path, PathBuf};

pub const MUTATION_TABLE_NAME: &str = "Cobblemon_berry_mutations_v1.0.csv";
pub const ARCHIVES_DIR_NAME: &str = "zip_archives";

/// 執行時使用的完整設定，由設定檔與命令列參數組合而成
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub archives_dir: PathBuf,
    pub jar_filename: String,
    pub output_dir: String,
    pub berry_table: String,
    pub mutation_table: String,
    pub entry_prefix: String,
}

impl ExtractorConfig {
    pub fn from_file_config(file: &FileConfig) -> Self {
        Self {
            archives_dir: file
                .archives_dir
                .clone()
                .unwrap_or_else(default_archives_dir),
            jar_filename: file.jar_filename.clone(),
            output_dir: ".".to_string(),
            berry_table: file.berry_table_name(),
            mutation_table: MUTATION_TABLE_NAME.to_string(),
            entry_prefix: BERRY_ENTRY_PREFIX.to_string(),
        }
    }
}

impl ConfigProvider for ExtractorConfig {
    fn archive_path(&self) -> PathBuf {
        self.archives_dir.join(&self.jar_filename)
    }

    fn entry_prefix(&self) -> &str {
        &self.entry_prefix
    }

    fn berry_table_name(&self) -> &str {
        &self.berry_table
    }

    fn mutation_table_name(&self) -> &str {
        &self.mutation_table
    }
}

/// 執行檔所在目錄往上兩層的 `zip_archives`
pub fn default_archives_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| archives_dir_for(&exe))
        .unwrap_or_else(|| PathBuf::from(ARCHIVES_DIR_NAME))
}

fn archives_dir_for(exe: &Path) -> Option<PathBuf> {
    let root = exe.parent()?.parent()?.parent()?;
    Some(root.join(ARCHIVES_DIR_NAME))
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "berry-extract")]
#[command(about = "Extract Cobblemon berry and mutation tables from a mod jar")]
pub struct CliArgs {
    /// Path to the configuration file (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = file_config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Directory holding the jar archive (overrides ARCHIVES_DIR)
    #[arg(long)]
    pub archives_dir: Option<PathBuf>,

    /// Jar file name (overrides JAR_FILENAME)
    #[arg(long)]
    pub jar: Option<String>,

    /// Directory the CSV files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Also print log events to the console
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    /// 命令列參數覆蓋設定檔
    pub fn apply(&self, config: &mut ExtractorConfig) {
        if let Some(dir) = &self.archives_dir {
            config.archives_dir = dir.clone();
        }
        if let Some(jar) = &self.jar {
            config.jar_filename = jar.clone();
        }
        config.output_dir = self.output_dir.clone();
    }
}
