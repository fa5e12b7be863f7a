//! 编译后模式模型
//! 触发词编译后的结构 + 单模式全量扫描（非重叠、最左优先）

use std::fmt;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// 命中区间（半开区间 `[start, end)`，UTF-8 字节偏移，始终落在字符边界上，且 `start < end`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "span must be non-empty: [{start},{end})");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 取出区间对应的原文片段
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Span::new(start, end)
    }
}

/// 运行时匹配器（仅经 `PatternCompiler` 构造，对外只暴露 `Pattern`）
#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    Literal(String), // 字面量匹配（区分大小写）
    Regex(Regex), // 正则匹配
}

impl Matcher {
    /// 扫描全文，返回按起点升序、两两不重叠的命中区间
    pub fn find_all(&self, text: &str) -> Vec<Span> {
        match self {
            Matcher::Literal(literal) => Self::find_literal(literal, text),
            Matcher::Regex(regex) => Self::find_regex(regex, text),
        }
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        match self {
            Matcher::Literal(_) => "literal",
            Matcher::Regex(r) => r.as_str(),
        }
    }

    fn find_literal(literal: &str, text: &str) -> Vec<Span> {
        // 空字面量只会产生零宽命中
        if literal.is_empty() {
            return Vec::new();
        }
        // match_indices 本身即为非重叠、最左优先
        text.match_indices(literal)
            .map(|(start, hit)| Span::new(start, start + hit.len()))
            .collect()
    }

    fn find_regex(regex: &Regex, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut last = 0;

        // 每次只在未扫描的后缀上搜索，命中后从命中终点继续
        while let Some(found) = regex.find(&text[last..]) {
            let start = last + found.start();
            let end = last + found.end();

            if start == end {
                // 零宽命中不记录，且至少前进一个字符
                let Some(ch) = text[end..].chars().next() else {
                    break;
                };
                trace!("零宽命中，跳过位置 {} | 规则: {}", end, regex.as_str());
                last = end + ch.len_utf8();
                continue;
            }

            spans.push(Span::new(start, end));
            last = end;
        }

        spans
    }
}

/// 编译后的触发词（只能由 `PatternCompiler` 构造，保证字面量非空、正则可编译）
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    pub(crate) fn new(source: String, matcher: Matcher) -> Self {
        Self { source, matcher }
    }

    /// 原始触发词（正则触发词含前缀）
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }

    /// 查找消息中该触发词的全部命中区间
    pub fn find_all(&self, text: &str) -> Vec<Span> {
        self.matcher.find_all(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> Vec<Span> {
        pairs.iter().copied().map(Span::from).collect()
    }

    #[test]
    fn test_literal_non_overlapping() {
        // "aa" 在 "aaaaa" 中只能非重叠命中两次
        let matcher = Matcher::Literal("aa".to_string());
        assert_eq!(matcher.find_all("aaaaa"), spans(&[(0, 2), (2, 4)]));
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let matcher = Matcher::Literal("Hello".to_string());
        assert!(matcher.find_all("hello HELLO").is_empty());
        assert_eq!(matcher.find_all("say Hello"), spans(&[(4, 9)]));
    }

    #[test]
    fn test_regex_resumes_after_match_end() {
        let matcher = Matcher::Regex(Regex::new("wor.d").unwrap());
        assert_eq!(matcher.find_all("hello world, world!"), spans(&[(6, 11), (13, 18)]));
    }

    #[test]
    fn test_regex_overlapping_candidates_are_skipped() {
        // "aba" 可在 0 和 2 处重叠命中，只保留第一处
        let matcher = Matcher::Regex(Regex::new("aba").unwrap());
        assert_eq!(matcher.find_all("ababa"), spans(&[(0, 3)]));
    }

    #[test]
    fn test_regex_zero_width_terminates() {
        let matcher = Matcher::Regex(Regex::new("x*").unwrap());
        assert_eq!(matcher.find_all("abxxc"), spans(&[(2, 4)]));

        let empty_only = Matcher::Regex(Regex::new("").unwrap());
        assert!(empty_only.find_all("abc").is_empty());
    }

    #[test]
    fn test_regex_zero_width_advances_by_char() {
        // 多字节字符上的零宽命中必须按字符前进，不能切到字符中间
        let matcher = Matcher::Regex(Regex::new("é*").unwrap());
        assert_eq!(matcher.find_all("aéé"), spans(&[(1, 5)]));
    }

    #[test]
    fn test_regex_anchor_applies_to_each_suffix() {
        let matcher = Matcher::Regex(Regex::new("^a").unwrap());
        assert_eq!(matcher.find_all("aab"), spans(&[(0, 1), (1, 2)]));
    }

    #[test]
    fn test_no_match_is_empty() {
        let matcher = Matcher::Literal("zzz".to_string());
        assert!(matcher.find_all("hello").is_empty());
        assert!(matcher.find_all("").is_empty());
    }

    #[test]
    fn test_empty_literal_yields_no_spans() {
        let matcher = Matcher::Literal(String::new());
        assert!(matcher.find_all("ab").is_empty());
        assert!(matcher.find_all("").is_empty());
    }

    #[test]
    fn test_spans_are_never_empty() {
        let matchers = [
            Matcher::Literal("a".to_string()),
            Matcher::Regex(Regex::new("a*").unwrap()),
            Matcher::Regex(Regex::new(r"\b").unwrap()),
        ];
        for matcher in &matchers {
            assert!(matcher.find_all("banana a").iter().all(|s| s.start < s.end));
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "span must be non-empty")]
    fn test_zero_width_span_rejected() {
        let _ = Span::new(2, 2);
    }

    #[test]
    fn test_span_slice() {
        let span = Span::new(6, 11);
        assert_eq!(span.slice("hello world"), "world");
        assert_eq!(span.len(), 5);
        assert_eq!(span.to_string(), "[6,11)");
    }
}
