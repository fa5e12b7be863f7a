//! 规则数据模型定义
//! 触发词 → 订阅者集合，按 (server, channel) 划分的规则集

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::compiler::{Pattern, PatternCompiler};
use crate::config::HighlightConfig;
use crate::error::{HlResult, HighlightError};

/// 订阅者标识（规范化后的用户名）
pub type Recipient = String;

/// 单条规则：一个触发词 + 订阅该触发词的用户集合
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub pattern: Pattern,
    pub recipients: BTreeSet<Recipient>,
}

impl Rule {
    pub fn new<I, R>(pattern: Pattern, recipients: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Recipient>,
    {
        Self {
            pattern,
            recipients: recipients.into_iter().map(Into::into).collect(),
        }
    }
}

/// 单个频道的完整规则集（只读，由外部配置存储提供）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// 追加规则；同一触发词已存在时合并订阅者
    pub fn push(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|r| r.pattern == rule.pattern) {
            Some(existing) => existing.recipients.extend(rule.recipients),
            None => self.rules.push(rule),
        }
    }

    /// 查找触发词（原始字符串）对应的规则
    pub fn get(&self, trigger: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.pattern.source() == trigger)
    }

    /// 为已编译触发词添加订阅者，返回是否新增
    pub fn add_recipient(&mut self, pattern: Pattern, recipient: impl Into<Recipient>) -> bool {
        let recipient = recipient.into();
        match self.rules.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => existing.recipients.insert(recipient),
            None => {
                self.rules.push(Rule::new(pattern, [recipient]));
                true
            }
        }
    }

    /// 从配置分区加载：触发词 → JSON 编码的用户名列表
    /// 每个触发词只在这里编译一次
    pub fn from_section<I, K, V>(entries: I, config: &HighlightConfig) -> HlResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut rule_set = Self::new();
        for (trigger, encoded) in entries {
            let trigger = trigger.as_ref();
            let recipients: Vec<Recipient> = serde_json::from_str(encoded.as_ref())
                .map_err(|source| HighlightError::RecipientDecodeError {
                    trigger: trigger.to_string(),
                    source,
                })?;
            let pattern = PatternCompiler::compile(trigger, config)?;
            rule_set.push(Rule::new(pattern, recipients));
        }

        debug!("规则集加载完成，触发词数：{}", rule_set.len());
        Ok(rule_set)
    }

    /// 编码回配置分区格式（与 `from_section` 对称）
    pub fn to_section(&self) -> HlResult<Vec<(String, String)>> {
        self.rules
            .iter()
            .map(|rule| {
                let encoded = serde_json::to_string(&rule.recipients)?;
                Ok((rule.pattern.source().to_string(), encoded))
            })
            .collect()
    }

    /// 从 JSON 对象加载：`{"触发词": ["用户名", ...]}`
    pub fn from_json(json: &str, config: &HighlightConfig) -> HlResult<Self> {
        let raw: BTreeMap<String, BTreeSet<Recipient>> = serde_json::from_str(json)?;
        let mut rule_set = Self::new();
        for (trigger, recipients) in raw {
            let pattern = PatternCompiler::compile(&trigger, config)?;
            rule_set.push(Rule::new(pattern, recipients));
        }
        Ok(rule_set)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
