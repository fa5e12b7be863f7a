//! 命中区间合并工具
//! 负责把同一订阅者的零散命中区间（可能重叠、无序）压缩为最少的不相交有序区间

use crate::compiler::Span;

/// 命中区间合并工具
pub struct SpanMerger;

impl SpanMerger {
    /// 合并命中区间
    /// - 按起点升序排序
    /// - 仅严格重叠（`start < tail.end`）时合并，首尾相接的区间保持独立
    pub fn merge(spans: &[Span]) -> Vec<Span> {
        let mut sorted = spans.to_vec();
        sorted.sort_unstable_by_key(|span| span.start);

        let mut iter = sorted.into_iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };

        let mut merged = vec![first];
        for span in iter {
            // merged 至少有一个元素
            let Some(tail) = merged.last_mut() else {
                continue;
            };
            if span.start < tail.end {
                tail.end = tail.end.max(span.end);
            } else {
                merged.push(span);
            }
        }

        merged
    }

    /// 原地合并，复用调用方的缓冲区
    pub fn merge_in_place(spans: &mut Vec<Span>) {
        let merged = Self::merge(spans);
        *spans = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> Vec<Span> {
        pairs.iter().copied().map(Span::from).collect()
    }

    #[test]
    fn test_overlapping_spans_merge() {
        assert_eq!(SpanMerger::merge(&spans(&[(0, 5), (3, 8)])), spans(&[(0, 8)]));
    }

    #[test]
    fn test_touching_spans_stay_separate() {
        assert_eq!(SpanMerger::merge(&spans(&[(0, 3), (3, 6)])), spans(&[(0, 3), (3, 6)]));
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        assert_eq!(
            SpanMerger::merge(&spans(&[(6, 11), (2, 5), (0, 3)])),
            spans(&[(0, 5), (6, 11)])
        );
    }

    #[test]
    fn test_contained_span_does_not_shrink_tail() {
        assert_eq!(SpanMerger::merge(&spans(&[(0, 10), (2, 4), (9, 12)])), spans(&[(0, 12)]));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(SpanMerger::merge(&spans(&[(1, 4), (1, 4)])), spans(&[(1, 4)]));
    }

    #[test]
    fn test_empty_input() {
        assert!(SpanMerger::merge(&[]).is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = SpanMerger::merge(&spans(&[(5, 9), (0, 2), (1, 3), (3, 4), (8, 10)]));
        let mut twice = once.clone();
        SpanMerger::merge_in_place(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(once, spans(&[(0, 3), (3, 4), (5, 10)]));
    }
}
