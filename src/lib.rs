//! rshighlight - 聊天消息高亮触发词匹配与渲染引擎
//!
//! 给定一条消息与频道的触发词规则（字面量或正则 → 订阅者集合），
//! 计算每个订阅者的命中区间、合并重叠区间，并渲染纯文本与带高亮标记的文本。

// 导出全局错误类型
pub use self::error::{HighlightError, HlResult};

// 导出配置模块
pub use self::config::{ConfigManager, HighlightConfig, HighlightConfigBuilder};

// 导出编译模块核心接口
pub use self::compiler::{Pattern, PatternCompiler, Span};

// 导出规则模块核心接口
pub use self::rule::{AddOutcome, ConfigStore, InMemoryConfigStore, Recipient, Rule, RuleSet};

// 导出工具模块核心接口
pub use self::utils::{SpanMerger, preview_compact};

// 导出渲染模块核心接口
pub use self::renderer::{HighlightRenderer, RenderedHighlight, escape_markup};

// 导出检测模块核心接口
pub use self::detector::{
    HighlightDetector,
    RecipientHighlight,
    RecipientMatches,
    TriggerAggregator,
    aggregate_and_merge,
    render,
};

// 导出宿主接入接口
pub use self::host::{
    ChannelNotifier, HIGHLIGHT_PERMISSION, HighlightService, IdentityResolver, Notification, Notifier,
    StaticIdentityResolver, SubscribeOutcome,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod compiler;
pub mod rule;
pub mod utils;
pub mod renderer;
pub mod detector;
pub mod host;
