//! 全局错误类型定义
//! 仅规则构建路径（触发词编译/规则加载/配置写入）会返回错误，逐消息的匹配、合并、渲染路径不会失败

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

#[derive(Error, Debug)]
pub enum HighlightError {
    // 触发词相关错误
    #[error("Invalid regex trigger `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: RegexError,
    },
    #[error("Literal trigger must not be empty")]
    EmptyLiteral,
    #[error("Regex trigger must have a body after the sentinel")]
    EmptyRegex,

    // 规则加载相关错误
    #[error("Failed to decode recipient list of trigger `{trigger}`: {source}")]
    RecipientDecodeError {
        trigger: String,
        #[source]
        source: SerdeJsonError,
    },
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 外部协作者错误
    #[error("Config store operation failed: {0}")]
    ConfigStoreError(String),
}

impl HighlightError {
    /// 是否属于触发词配置错误（注册时应回显给用户）
    pub fn is_pattern_error(&self) -> bool {
        matches!(
            self,
            HighlightError::InvalidPattern { .. } | HighlightError::EmptyLiteral | HighlightError::EmptyRegex
        )
    }
}

// 全局Result类型
pub type HlResult<T> = Result<T, HighlightError>;
