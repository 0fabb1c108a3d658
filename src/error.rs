//! # 统一错误处理模块
//!
//! 定义 generate_esp 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// generate_esp 统一错误类型
#[derive(Error, Debug)]
pub enum EspError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部量化程序错误
    // ─────────────────────────────────────────────────────────────
    #[error("{command} not installed\n{hint}")]
    EngineUnavailable { command: String, hint: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("{path} not generated")]
    OutputMissing { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EspError {
    /// 为解析错误附加文件路径（内容解析器不知道来源文件）
    pub fn with_path(self, path: &str) -> Self {
        match self {
            EspError::ParseError { format, reason, .. } => EspError::ParseError {
                format,
                path: path.to_string(),
                reason,
            },
            other => other,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, EspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_path_rewrites_parse_error() {
        let err = EspError::ParseError {
            format: "xyz".to_string(),
            path: "<string>".to_string(),
            reason: "Empty XYZ file".to_string(),
        }
        .with_path("water.xyz");

        let msg = err.to_string();
        assert!(msg.contains("water.xyz"));
        assert!(msg.contains("Empty XYZ file"));
    }

    #[test]
    fn test_with_path_keeps_other_errors() {
        let err = EspError::FileNotFound {
            path: "a.xyz".to_string(),
        }
        .with_path("b.xyz");
        assert_eq!(err.to_string(), "File not found: a.xyz");
    }

    #[test]
    fn test_engine_unavailable_message_has_hint() {
        let err = EspError::EngineUnavailable {
            command: "Psi4".to_string(),
            hint: "Install with: conda install -c conda-forge psi4".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Psi4 not installed"));
        assert!(msg.contains("conda install -c conda-forge psi4"));
    }
}
