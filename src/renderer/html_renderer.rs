//! 高亮渲染器
//! 将原始消息与合并后的命中区间渲染为（纯文本, 标记文本）
//! 文本内容一律转义，高亮标记本身从不转义

use crate::compiler::Span;
use crate::config::HighlightConfig;

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHighlight {
    pub plain: String,
    pub markup: String,
}

/// 转义 HTML 文本中的特殊字符（`&` `<` `>`），结果追加到 `out`
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// 转义 HTML 文本中的特殊字符
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

/// 高亮渲染器（持有高亮标记对，其余无状态）
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    marker_open: String,
    marker_close: String,
    escape_plain: bool,
}

impl Default for HighlightRenderer {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}

impl HighlightRenderer {
    pub fn new(marker_open: impl Into<String>, marker_close: impl Into<String>) -> Self {
        Self {
            marker_open: marker_open.into(),
            marker_close: marker_close.into(),
            escape_plain: false,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            marker_open: config.marker_open.clone(),
            marker_close: config.marker_close.clone(),
            escape_plain: config.escape_plain,
        }
    }

    /// 纯文本是否转义
    pub fn with_escape_plain(mut self, escape: bool) -> Self {
        self.escape_plain = escape;
        self
    }

    /// 渲染消息
    /// `spans` 必须是 `SpanMerger::merge` 的输出：升序、不相交、落在字符边界上
    pub fn render(&self, message: &str, spans: &[Span]) -> RenderedHighlight {
        let plain = if self.escape_plain {
            escape_markup(message)
        } else {
            message.to_string()
        };

        RenderedHighlight {
            plain,
            markup: self.render_markup(message, spans),
        }
    }

    /// 只渲染标记文本
    pub fn render_markup(&self, message: &str, spans: &[Span]) -> String {
        debug_assert!(
            spans.windows(2).all(|pair| pair[0].end <= pair[1].start),
            "spans must be ascending and disjoint: {spans:?}"
        );
        debug_assert!(
            spans.last().is_none_or(|span| span.end <= message.len()),
            "spans must lie within the message ({} bytes): {spans:?}",
            message.len()
        );

        let marker_len = spans.len() * (self.marker_open.len() + self.marker_close.len());
        let mut markup = String::with_capacity(message.len() + marker_len);
        let mut last = 0;

        for span in spans {
            // 区间之间的文本和区间内的文本分别转义，保证标记不被转义、相邻文本不漏转义
            escape_into(&mut markup, &message[last..span.start]);
            markup.push_str(&self.marker_open);
            escape_into(&mut markup, span.slice(message));
            markup.push_str(&self.marker_close);
            last = span.end;
        }
        escape_into(&mut markup, &message[last..]);

        markup
    }
}
