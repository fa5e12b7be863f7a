//! 通知组装与投递契约
//! 通知投递是即发即弃的：核心不等待投递结果

use tokio::sync::mpsc;
use tracing::warn;

use crate::detector::RecipientHighlight;
use crate::renderer::escape_markup;

/// 一条待投递的高亮通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub server: String,
    pub recipient: String,
    pub subject: String,
    pub plain_body: String,
    pub markup_body: String,
}

impl Notification {
    /// 组装通知
    /// - 标题：`Highlight in {channel} on {server}`
    /// - 纯文本：`{timestamp} <{nickname}> {plain}`
    /// - 标记文本：`{timestamp} <b>&lt;{nickname}&gt;</b> {markup}`
    pub fn compose(
        server: &str,
        channel: &str,
        timestamp: &str,
        nickname: &str,
        highlight: &RecipientHighlight,
    ) -> Self {
        Self {
            server: server.to_string(),
            recipient: highlight.recipient.clone(),
            subject: format!("Highlight in {} on {}", channel, server),
            plain_body: format!("{} <{}> {}", timestamp, nickname, highlight.plain),
            markup_body: format!(
                "{} <b>&lt;{}&gt;</b> {}",
                timestamp,
                escape_markup(nickname),
                highlight.markup
            ),
        }
    }
}

/// 从 IRC hostmask（`nick!user@host`）中取出昵称
pub fn parse_nickname(hostmask: &str) -> &str {
    hostmask.split('!').next().unwrap_or(hostmask)
}

/// 通知投递契约（同步、即发即弃）
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// 基于 tokio 通道的投递器：把通知交给宿主的投递任务
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// 创建投递器与对应的接收端
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(err) = self.tx.send(notification) {
            warn!("通知投递通道已关闭，丢弃通知 | 接收者: {}", err.0.recipient);
        }
    }
}
