//! 工具模块：区间合并与日志预览
pub mod span_merger;
pub mod preview;

pub use self::span_merger::SpanMerger;
pub use self::preview::preview_compact;
