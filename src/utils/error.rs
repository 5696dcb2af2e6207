use crate::domain::model::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Archive not found: {}", path.display())]
    ArchiveNotFound { path: PathBuf },

    #[error("Failed to parse {entry}: {reason}")]
    MalformedEntry { entry: String, reason: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    /// 中途失敗時保留已收集的診斷，讓報告層仍能輸出
    #[error("{source}")]
    Interrupted {
        source: Box<EtlError>,
        diagnostics: Vec<Diagnostic>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Archive,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定行程退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    /// 附上失敗前已收集的診斷；沒有診斷時原樣回傳
    pub fn with_diagnostics(self, diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            return self;
        }
        match self {
            EtlError::Interrupted {
                source,
                diagnostics: mut earlier,
            } => {
                earlier.extend(diagnostics);
                EtlError::Interrupted {
                    source,
                    diagnostics: earlier,
                }
            }
            other => EtlError::Interrupted {
                source: Box::new(other),
                diagnostics,
            },
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            EtlError::Interrupted { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::Interrupted { source, .. } => source.category(),
            EtlError::ArchiveNotFound { .. } | EtlError::ZipError(_) => ErrorCategory::Archive,
            EtlError::MalformedEntry { .. } | EtlError::SerializationError(_) => {
                ErrorCategory::Data
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Output,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::Interrupted { source, .. } => source.severity(),
            EtlError::MalformedEntry { .. } => ErrorSeverity::Low,
            EtlError::SerializationError(_) => ErrorSeverity::Medium,
            EtlError::ArchiveNotFound { .. }
            | EtlError::CsvError(_)
            | EtlError::IoError(_)
            | EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            // 壓縮檔本身毀損，無法繼續
            EtlError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Archive => {
                "Check that the archive exists in the archives directory and that JAR_FILENAME matches it"
            }
            ErrorCategory::Data => "The entry was skipped; inspect the JSON inside the archive",
            ErrorCategory::Output => {
                "Check write permissions and free disk space for the output directory"
            }
            ErrorCategory::Configuration => "Fix the configuration file and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::Interrupted { source, .. } => source.user_friendly_message(),
            EtlError::ArchiveNotFound { path } => {
                format!("Target JAR not found: {}", path.display())
            }
            EtlError::ZipError(_) => "The archive could not be read as a zip/jar file".to_string(),
            EtlError::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
