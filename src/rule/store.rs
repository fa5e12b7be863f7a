//! 规则存储抽象
//! 规则的持久化由宿主负责，这里只定义读写契约，并提供一个内存实现供测试与简单宿主使用

use std::collections::BTreeSet;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::model::{Recipient, RuleSet};
use crate::compiler::Pattern;
use crate::config::HighlightConfig;
use crate::error::HlResult;

/// 添加订阅者的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// 配置存储契约
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// 读取频道规则集
    async fn get_rules(&self, server: &str, channel: &str) -> HlResult<RuleSet>;

    /// 读取某个触发词的订阅者（触发词不存在时返回空集合）
    async fn get_recipients_for_pattern(
        &self,
        server: &str,
        channel: &str,
        trigger: &str,
    ) -> HlResult<BTreeSet<Recipient>>;

    /// 为已校验的触发词添加订阅者
    async fn add_recipient(
        &self,
        server: &str,
        channel: &str,
        pattern: &Pattern,
        recipient: &str,
    ) -> HlResult<AddOutcome>;
}

type ChannelKey = (String, String);

/// 内存规则存储（只保存编译后的规则，校验发生在写入时）
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    sections: RwLock<FxHashMap<ChannelKey, RuleSet>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 载入一个配置分区（触发词 → JSON 编码的用户名列表），覆盖已有内容
    pub async fn load_section<I, K, V>(
        &self,
        server: &str,
        channel: &str,
        entries: I,
        config: &HighlightConfig,
    ) -> HlResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let rule_set = RuleSet::from_section(entries, config)?;
        debug!("载入规则分区 | 服务器: {} | 频道: {} | 触发词数: {}", server, channel, rule_set.len());
        self.sections
            .write()
            .await
            .insert((server.to_string(), channel.to_string()), rule_set);
        Ok(())
    }

    /// 导出配置分区（触发词 → JSON 编码的用户名列表）
    pub async fn export_section(&self, server: &str, channel: &str) -> HlResult<Vec<(String, String)>> {
        let sections = self.sections.read().await;
        match sections.get(&(server.to_string(), channel.to_string())) {
            Some(rule_set) => rule_set.to_section(),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get_rules(&self, server: &str, channel: &str) -> HlResult<RuleSet> {
        let sections = self.sections.read().await;
        Ok(sections
            .get(&(server.to_string(), channel.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_recipients_for_pattern(
        &self,
        server: &str,
        channel: &str,
        trigger: &str,
    ) -> HlResult<BTreeSet<Recipient>> {
        let sections = self.sections.read().await;
        Ok(sections
            .get(&(server.to_string(), channel.to_string()))
            .and_then(|rule_set| rule_set.get(trigger))
            .map(|rule| rule.recipients.clone())
            .unwrap_or_default())
    }

    async fn add_recipient(
        &self,
        server: &str,
        channel: &str,
        pattern: &Pattern,
        recipient: &str,
    ) -> HlResult<AddOutcome> {
        let mut sections = self.sections.write().await;
        let rule_set = sections
            .entry((server.to_string(), channel.to_string()))
            .or_default();

        if rule_set.add_recipient(pattern.clone(), recipient) {
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyPresent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::PatternCompiler;

    #[tokio::test]
    async fn test_add_and_read_back() {
        let store = InMemoryConfigStore::new();
        let pattern = PatternCompiler::compile("~wor.d", &HighlightConfig::default()).unwrap();

        let first = store.add_recipient("irc.example", "#rust", &pattern, "alice").await.unwrap();
        let second = store.add_recipient("irc.example", "#rust", &pattern, "alice").await.unwrap();
        assert_eq!(first, AddOutcome::Added);
        assert_eq!(second, AddOutcome::AlreadyPresent);

        let recipients = store
            .get_recipients_for_pattern("irc.example", "#rust", "~wor.d")
            .await
            .unwrap();
        assert_eq!(recipients.into_iter().collect::<Vec<_>>(), vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_channels_are_isolated() {
        let store = InMemoryConfigStore::new();
        store
            .load_section("irc.example", "#rust", [("hello", r#"["alice"]"#)], &HighlightConfig::default())
            .await
            .unwrap();

        assert_eq!(store.get_rules("irc.example", "#rust").await.unwrap().len(), 1);
        assert!(store.get_rules("irc.example", "#go").await.unwrap().is_empty());
        assert!(store.get_rules("irc.other", "#rust").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_section() {
        let store = InMemoryConfigStore::new();
        store
            .load_section("irc.example", "#rust", [("hello", r#"["bob","alice"]"#)], &HighlightConfig::default())
            .await
            .unwrap();

        let section = store.export_section("irc.example", "#rust").await.unwrap();
        assert_eq!(section, vec![("hello".to_string(), r#"["alice","bob"]"#.to_string())]);
        assert!(store.export_section("irc.example", "#go").await.unwrap().is_empty());
    }
}
