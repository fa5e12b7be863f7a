//! 触发词聚合分析器
//! 遍历频道规则集，逐条触发词扫描消息，按订阅者累积命中区间

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::compiler::Span;
use crate::rule::{Recipient, RuleSet};

/// 订阅者 → 原始命中区间（未排序、可能重叠）
pub type RecipientMatches = FxHashMap<Recipient, Vec<Span>>;

/// 触发词聚合器
pub struct TriggerAggregator;

impl TriggerAggregator {
    /// 聚合命中区间
    /// - 无命中的规则直接跳过，不产生空条目
    /// - `exclude`（通常是消息作者）即使订阅了命中的触发词也不会出现在结果中
    pub fn aggregate(rule_set: &RuleSet, message: &str, exclude: Option<&str>) -> RecipientMatches {
        let mut matches = RecipientMatches::default();

        for rule in rule_set {
            let spans = rule.pattern.find_all(message);
            if spans.is_empty() {
                continue;
            }

            debug!(
                "触发词命中 | 触发词: {} | 命中数: {} | 订阅者数: {}",
                rule.pattern,
                spans.len(),
                rule.recipients.len()
            );

            for recipient in &rule.recipients {
                if exclude == Some(recipient.as_str()) {
                    continue;
                }
                matches
                    .entry(recipient.clone())
                    .or_default()
                    .extend_from_slice(&spans);
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;

    fn rule_set(entries: &[(&str, &str)]) -> RuleSet {
        RuleSet::from_section(entries.iter().copied(), &HighlightConfig::default()).unwrap()
    }

    #[test]
    fn test_aggregate_per_recipient() {
        let rules = rule_set(&[("hello", r#"["alice"]"#), ("~wor.d", r#"["alice","bob"]"#)]);
        let matches = TriggerAggregator::aggregate(&rules, "hello world", None);

        let mut alice = matches["alice"].clone();
        alice.sort();
        assert_eq!(alice, vec![Span::new(0, 5), Span::new(6, 11)]);
        assert_eq!(matches["bob"], vec![Span::new(6, 11)]);
    }

    #[test]
    fn test_excluded_recipient_never_appears() {
        let rules = rule_set(&[("hello", r#"["alice","bob"]"#)]);
        let matches = TriggerAggregator::aggregate(&rules, "hello", Some("alice"));

        assert!(!matches.contains_key("alice"));
        assert!(matches.contains_key("bob"));
    }

    #[test]
    fn test_no_match_leaves_no_entries() {
        let rules = rule_set(&[("zzz", r#"["alice"]"#), ("~q+", r#"["bob"]"#)]);
        assert!(TriggerAggregator::aggregate(&rules, "hello world", None).is_empty());
    }

    #[test]
    fn test_only_subscriber_excluded_leaves_empty_map() {
        let rules = rule_set(&[("hello", r#"["alice"]"#)]);
        assert!(TriggerAggregator::aggregate(&rules, "hello", Some("alice")).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(TriggerAggregator::aggregate(&RuleSet::new(), "hello", None).is_empty());
        let rules = rule_set(&[("hello", r#"["alice"]"#)]);
        assert!(TriggerAggregator::aggregate(&rules, "", None).is_empty());
    }
}
