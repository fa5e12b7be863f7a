//! 全局配置管理,存储所有可配置项

use serde::{Deserialize, Serialize};

/// 默认正则编译体积上限（1 MiB），在配置层拦截病态正则
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// 全局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    // 正则触发词前缀
    pub regex_sentinel: char,
    // 高亮起始标记（原样输出，不转义）
    pub marker_open: String,
    // 高亮结束标记（原样输出，不转义）
    pub marker_close: String,
    // 纯文本输出是否转义
    pub escape_plain: bool,
    // 是否排除消息作者本人
    pub exclude_author: bool,
    // 正则编译体积上限（字节）
    pub regex_size_limit: usize,
    // 通知时间戳格式（chrono strftime）
    pub timestamp_format: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            regex_sentinel: '~',
            marker_open: "<mark>".to_string(),
            marker_close: "</mark>".to_string(),
            escape_plain: false,
            exclude_author: true,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            timestamp_format: "%H:%M".to_string(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> HighlightConfig {
        HighlightConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> HighlightConfigBuilder {
        HighlightConfigBuilder::new()
    }

    /// 从JSON文本加载配置（缺省字段使用默认值）
    pub fn from_json(json: &str) -> crate::HlResult<HighlightConfig> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct HighlightConfigBuilder {
    config: HighlightConfig,
}

impl HighlightConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: HighlightConfig::default(),
        }
    }

    pub fn regex_sentinel(mut self, sentinel: char) -> Self {
        self.config.regex_sentinel = sentinel;
        self
    }

    /// 设置高亮标记对，例如 `<font color="red">` / `</font>`
    pub fn marker(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.config.marker_open = open.into();
        self.config.marker_close = close.into();
        self
    }

    pub fn escape_plain(mut self, escape: bool) -> Self {
        self.config.escape_plain = escape;
        self
    }

    pub fn exclude_author(mut self, exclude: bool) -> Self {
        self.config.exclude_author = exclude;
        self
    }

    pub fn regex_size_limit(mut self, limit: usize) -> Self {
        self.config.regex_size_limit = limit;
        self
    }

    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.config.timestamp_format = format.into();
        self
    }

    pub fn build(self) -> HighlightConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ConfigManager::custom()
            .marker("<font color=\"red\">", "</font>")
            .exclude_author(false)
            .build();

        assert_eq!(config.marker_open, "<font color=\"red\">");
        assert_eq!(config.marker_close, "</font>");
        assert!(!config.exclude_author);
        // 未覆盖的字段保持默认
        assert_eq!(config.regex_sentinel, '~');
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ConfigManager::from_json(r#"{"escape_plain": true}"#).unwrap();
        assert!(config.escape_plain);
        assert_eq!(config.marker_open, "<mark>");
        assert_eq!(config.timestamp_format, "%H:%M");
    }
}
