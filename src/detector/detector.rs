//! Highlight detector core module
//! 高亮检测器核心
//! 核心职责：
//! 1. 触发词聚合 + 区间合并（aggregate_and_merge）
//! 2. 高亮渲染（render）
//! 3. 组合为按订阅者排序的完整结果（highlight）
//!
//! 全部为纯同步计算，不持有跨消息的可变状态

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use super::analyzer::TriggerAggregator;
use crate::compiler::Span;
use crate::config::HighlightConfig;
use crate::renderer::{HighlightRenderer, RenderedHighlight};
use crate::rule::{Recipient, RuleSet};
use crate::utils::{SpanMerger, preview_compact};

/// 单个订阅者的高亮结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientHighlight {
    pub recipient: Recipient,
    pub spans: Vec<Span>,
    pub plain: String,
    pub markup: String,
}

/// 高亮检测器
#[derive(Debug, Clone)]
pub struct HighlightDetector {
    config: HighlightConfig,
    renderer: HighlightRenderer,
}

impl Default for HighlightDetector {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl HighlightDetector {
    pub fn new(config: HighlightConfig) -> Self {
        let renderer = HighlightRenderer::from_config(&config);
        Self { config, renderer }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// 聚合并合并：订阅者 → 不相交有序区间（无命中的订阅者不出现）
    pub fn aggregate_and_merge(
        &self,
        rule_set: &RuleSet,
        message: &str,
        exclude: Option<&str>,
    ) -> FxHashMap<Recipient, Vec<Span>> {
        aggregate_and_merge(rule_set, message, exclude)
    }

    /// 按配置的高亮标记渲染
    pub fn render(&self, message: &str, merged_spans: &[Span]) -> RenderedHighlight {
        self.renderer.render(message, merged_spans)
    }

    /// 完整流程：聚合 → 合并 → 渲染，结果按订阅者名排序
    pub fn highlight(
        &self,
        rule_set: &RuleSet,
        message: &str,
        exclude: Option<&str>,
    ) -> Vec<RecipientHighlight> {
        let merged = self.aggregate_and_merge(rule_set, message, exclude);

        let mut results: Vec<RecipientHighlight> = merged
            .into_iter()
            .map(|(recipient, spans)| {
                let RenderedHighlight { plain, markup } = self.render(message, &spans);
                RecipientHighlight { recipient, spans, plain, markup }
            })
            .collect();
        results.sort_by(|a, b| a.recipient.cmp(&b.recipient));

        debug!(
            "高亮检测完成 | 消息: {} | 订阅者数: {}",
            preview_compact(message, 60),
            results.len()
        );
        results
    }
}

/// 聚合 + 合并（对外入口）
pub fn aggregate_and_merge(
    rule_set: &RuleSet,
    message: &str,
    exclude: Option<&str>,
) -> FxHashMap<Recipient, Vec<Span>> {
    let mut matches = TriggerAggregator::aggregate(rule_set, message, exclude);
    for spans in matches.values_mut() {
        SpanMerger::merge_in_place(spans);
    }
    matches
}

/// 使用默认高亮标记渲染（对外入口）
pub fn render(message: &str, merged_spans: &[Span]) -> RenderedHighlight {
    HighlightRenderer::default().render(message, merged_spans)
}
