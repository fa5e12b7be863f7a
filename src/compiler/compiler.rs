//! 触发词编译器核心
//! 仅负责将原始触发词字符串编译为可执行的匹配模式，所有校验都在这里完成，逐消息路径不再重复校验

use regex::RegexBuilder;
use tracing::debug;

use super::pattern::{Matcher, Pattern};
use crate::config::HighlightConfig;
use crate::error::{HlResult, HighlightError};

/// 触发词编译器
pub struct PatternCompiler;

impl PatternCompiler {
    /// 编译单个触发词
    /// - 以 `config.regex_sentinel` 开头：去掉前缀后按正则编译
    /// - 其他：按区分大小写的字面量处理
    pub fn compile(raw: &str, config: &HighlightConfig) -> HlResult<Pattern> {
        match raw.strip_prefix(config.regex_sentinel) {
            Some(body) => Self::compile_regex(raw, body, config.regex_size_limit),
            None => Self::compile_literal(raw),
        }
    }

    /// 仅校验触发词是否合法（注册流程使用）
    pub fn validate(raw: &str, config: &HighlightConfig) -> HlResult<()> {
        Self::compile(raw, config).map(|_| ())
    }

    fn compile_literal(raw: &str) -> HlResult<Pattern> {
        if raw.is_empty() {
            return Err(HighlightError::EmptyLiteral);
        }
        let pattern = Pattern::new(raw.to_string(), Matcher::Literal(raw.to_string()));
        debug!("字面量触发词编译完成 | 触发词: {} | 匹配器: {}", raw, pattern.matcher().describe());
        Ok(pattern)
    }

    fn compile_regex(raw: &str, body: &str, size_limit: usize) -> HlResult<Pattern> {
        if body.is_empty() {
            return Err(HighlightError::EmptyRegex);
        }

        let regex = RegexBuilder::new(body)
            .size_limit(size_limit)
            .build()
            .map_err(|source| HighlightError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;

        let pattern = Pattern::new(raw.to_string(), Matcher::Regex(regex));
        debug!("正则触发词编译完成 | 触发词: {} | 匹配器: {}", raw, pattern.matcher().describe());
        Ok(pattern)
    }
}
