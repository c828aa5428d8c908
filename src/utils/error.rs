use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("XML parsing failed: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No source data: neither {xlsx} nor {legacy} exists")]
    SourceNotFound { xlsx: String, legacy: String },

    #[error("Worksheet not found: {message}")]
    MissingWorksheet { message: String },

    #[error("Workbook part missing: {part}")]
    MissingPart { part: String },

    #[error("Invalid cell {reference}: {message}")]
    InvalidCell { reference: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Workbook,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 資料內容有問題
    Medium,
    /// 輸入或設定無法使用
    High,
    /// 系統層級錯誤
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SourceNotFound { .. } => ErrorCategory::Source,
            EtlError::MissingWorksheet { .. } | EtlError::MissingPart { .. } => {
                ErrorCategory::Workbook
            }
            EtlError::InvalidCell { .. } | EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::ZipError(_) | EtlError::XmlError(_) | EtlError::IoError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Source | ErrorCategory::Workbook | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::SourceNotFound { xlsx, .. } => {
                format!("Download the ABDC journal list and save it as {}", xlsx)
            }
            EtlError::MissingWorksheet { .. } | EtlError::MissingPart { .. } => {
                "Re-save the workbook as .xlsx from a spreadsheet application".to_string()
            }
            EtlError::InvalidCell { .. } => {
                "The worksheet references data that is not in the workbook; re-export it".to_string()
            }
            EtlError::SerializationError(_) => {
                "Check that the legacy JSON file is an array of objects".to_string()
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the TOML configuration file".to_string()
            }
            EtlError::ZipError(_) => "The workbook is not a valid zip archive".to_string(),
            EtlError::XmlError(_) => "The workbook contains malformed XML".to_string(),
            EtlError::IoError(_) => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::SourceNotFound { xlsx, legacy } => {
                format!("neither {} nor {} exists", xlsx, legacy)
            }
            EtlError::MissingPart { part } => format!("workbook is missing {}", part),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_exits_with_one() {
        let err = EtlError::SourceNotFound {
            xlsx: "data/abdc.xlsx".to_string(),
            legacy: "data/abdc.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Source);
        assert_eq!(err.severity().exit_code(), 1);
        assert_eq!(
            err.user_friendly_message(),
            "neither data/abdc.xlsx nor data/abdc.json exists"
        );
    }

    #[test]
    fn test_severity_by_category() {
        let part = EtlError::MissingPart {
            part: "xl/workbook.xml".to_string(),
        };
        assert_eq!(part.severity(), ErrorSeverity::High);

        let cell = EtlError::InvalidCell {
            reference: "A2".to_string(),
            message: "bad index".to_string(),
        };
        assert_eq!(cell.severity().exit_code(), 2);

        let io = EtlError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
