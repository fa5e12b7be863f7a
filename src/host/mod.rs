//! 宿主接入模块：外部协作者契约（身份解析、通知投递）与组合服务
pub mod identity;
pub mod notification;
pub mod service;

pub use self::identity::{IdentityResolver, StaticIdentityResolver};
pub use self::notification::{ChannelNotifier, Notification, Notifier, parse_nickname};
pub use self::service::{HIGHLIGHT_PERMISSION, HighlightService, SubscribeOutcome};
