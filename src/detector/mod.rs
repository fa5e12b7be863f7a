//! 检测模块：触发词聚合、区间合并与渲染的组合入口
pub mod analyzer;
pub mod detector;

// 导出核心接口
pub use self::analyzer::{RecipientMatches, TriggerAggregator};
pub use self::detector::{
    HighlightDetector,
    RecipientHighlight,
    aggregate_and_merge,
    render,
};
