use crate::utils::error::{EtlError, Result};
use crate::utils::logger::LogSettings;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_JAR_FILENAME: &str = "Cobblemon-fabric-1.5.2+1.20.1.jar";
pub const DEFAULT_OUTPUT_FILENAME: &str = "Cobblemon_berry_info_extract_v1.0";
pub const DEFAULT_LOG_FILENAME: &str = "process_log.txt";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_LOG_FORMAT: &str = "%(asctime)s - %(levelname)s - %(message)s";

/// 設定檔內容；每個鍵都有預設值，未知的鍵會被忽略
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    #[serde(rename = "JAR_FILENAME")]
    pub jar_filename: String,
    pub output_filename: String,
    /// 保留相容性用；抽取流程是單執行緒，這個值不會被使用
    #[serde(rename = "MAX_WORKERS")]
    pub max_workers: usize,
    #[serde(rename = "LOG_FILENAME")]
    pub log_filename: String,
    #[serde(rename = "LOG_LEVEL")]
    pub log_level: String,
    #[serde(rename = "LOG_FORMAT")]
    pub log_format: String,
    #[serde(rename = "ARCHIVES_DIR")]
    pub archives_dir: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            jar_filename: DEFAULT_JAR_FILENAME.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            max_workers: 8,
            log_filename: DEFAULT_LOG_FILENAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            archives_dir: None,
        }
    }
}

impl FileConfig {
    /// 從檔案載入配置；檔案不存在時回傳 `None`，由呼叫端改用預設值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(EtlError::IoError(e)),
        };

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        Ok(Some(config))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        serde_json::from_str(&processed).map_err(|e| EtlError::ConfigValidationError {
            field: "json_parsing".to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JAR_VERSION})，未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 樹果表檔名，沒有 `.csv` 副檔名時自動補上
    pub fn berry_table_name(&self) -> String {
        if self.output_filename.ends_with(".csv") {
            self.output_filename.clone()
        } else {
            format!("{}.csv", self.output_filename)
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            filename: self.log_filename.clone(),
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("JAR_FILENAME", &self.jar_filename)?;
        validate_path("JAR_FILENAME", &self.jar_filename)?;
        validate_non_empty_string("output_filename", &self.output_filename)?;
        validate_path("output_filename", &self.output_filename)?;
        validate_path("LOG_FILENAME", &self.log_filename)?;
        validate_positive_number("MAX_WORKERS", self.max_workers, 1)?;

        if let Some(dir) = &self.archives_dir {
            validate_path("ARCHIVES_DIR", &dir.to_string_lossy())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_config() {
        let config = FileConfig::from_json_str(
            r#"{
                "JAR_FILENAME": "Cobblemon-fabric-1.6.0+1.21.1.jar",
                "output_filename": "berries",
                "MAX_WORKERS": 4,
                "LOG_LEVEL": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.jar_filename, "Cobblemon-fabric-1.6.0+1.21.1.jar");
        assert_eq!(config.berry_table_name(), "berries.csv");
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_filename, DEFAULT_LOG_FILENAME);
        assert_eq!(config.log_format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = FileConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(
            config.berry_table_name(),
            "Cobblemon_berry_info_extract_v1.0.csv"
        );
    }

    #[test]
    fn test_csv_suffix_not_duplicated() {
        let config = FileConfig {
            output_filename: "berries.csv".to_string(),
            ..Default::default()
        };
        assert_eq!(config.berry_table_name(), "berries.csv");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = FileConfig::from_json_str(r#"{"THEME": "dark", "output_filename": "x"}"#)
            .unwrap();
        assert_eq!(config.output_filename, "x");
    }

    #[test]
    fn test_parse_toml_config() {
        let config = FileConfig::from_toml_str(
            r#"
JAR_FILENAME = "Cobblemon-forge.jar"
LOG_FORMAT = "json"
ARCHIVES_DIR = "/srv/archives"
"#,
        )
        .unwrap();

        assert_eq!(config.jar_filename, "Cobblemon-forge.jar");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.archives_dir, Some(PathBuf::from("/srv/archives")));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BERRY_TEST_JAR", "Cobblemon-env.jar");

        let config = FileConfig::from_json_str(r#"{"JAR_FILENAME": "${BERRY_TEST_JAR}"}"#).unwrap();
        assert_eq!(config.jar_filename, "Cobblemon-env.jar");

        std::env::remove_var("BERRY_TEST_JAR");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = FileConfig::from_json_str("{ JAR_FILENAME: ");
        assert!(matches!(
            result,
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_missing_file_returns_none() {
        let result = FileConfig::from_file("/nonexistent/berry/config.json").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{"output_filename": "from_file"}"#)
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap().unwrap();
        assert_eq!(config.output_filename, "from_file");
    }

    #[test]
    fn test_validation() {
        assert!(FileConfig::default().validate().is_ok());

        let zero_workers = FileConfig {
            max_workers: 0,
            ..Default::default()
        };
        assert!(zero_workers.validate().is_err());

        let blank_jar = FileConfig {
            jar_filename: "  ".to_string(),
            ..Default::default()
        };
        assert!(blank_jar.validate().is_err());
    }
}
