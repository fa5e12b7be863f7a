//! 高亮服务：把纯计算核心接到宿主的配置存储、身份解析、通知投递上
//! 宿主负责所有异步 I/O，核心调用本身是同步的

use std::fmt::Write;
use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use super::identity::IdentityResolver;
use super::notification::{Notification, Notifier, parse_nickname};
use crate::compiler::PatternCompiler;
use crate::config::HighlightConfig;
use crate::detector::HighlightDetector;
use crate::error::HlResult;
use crate::rule::{AddOutcome, ConfigStore};
use crate::utils::preview_compact;

/// 注册触发词所需的权限名
pub const HIGHLIGHT_PERMISSION: &str = "highlight";

const FALLBACK_TIMESTAMP_FORMAT: &str = "%H:%M";

/// 订阅结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Added,
    AlreadySubscribed,
    NotAuthorized,
    UnknownUser,
}

/// 高亮服务
pub struct HighlightService<S, I, N> {
    store: S,
    identity: I,
    notifier: N,
    detector: HighlightDetector,
}

impl<S, I, N> HighlightService<S, I, N>
where
    S: ConfigStore,
    I: IdentityResolver,
    N: Notifier,
{
    pub fn new(store: S, identity: I, notifier: N, config: HighlightConfig) -> Self {
        Self {
            store,
            identity,
            notifier,
            detector: HighlightDetector::new(config),
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        self.detector.config()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 处理一条频道消息，返回发出的通知数
    pub async fn on_message(
        &self,
        server: &str,
        hostmask: &str,
        channel: &str,
        message: &str,
    ) -> HlResult<usize> {
        self.on_message_at(server, hostmask, channel, message, Local::now().naive_local())
            .await
    }

    /// 同 `on_message`，时间戳由调用方给定
    pub async fn on_message_at(
        &self,
        server: &str,
        hostmask: &str,
        channel: &str,
        message: &str,
        now: NaiveDateTime,
    ) -> HlResult<usize> {
        if message.is_empty() {
            return Ok(0);
        }

        let rules = self.store.get_rules(server, channel).await?;
        if rules.is_empty() {
            return Ok(0);
        }

        let author = if self.config().exclude_author {
            self.identity.resolve_username(server, hostmask).await?
        } else {
            None
        };

        let highlights = self.detector.highlight(&rules, message, author.as_deref());
        if highlights.is_empty() {
            return Ok(0);
        }

        let timestamp = self.format_timestamp(now);
        let nickname = parse_nickname(hostmask);
        for highlight in &highlights {
            let notification = Notification::compose(server, channel, &timestamp, nickname, highlight);
            self.notifier.notify(notification);
        }

        debug!(
            "高亮通知已发出 | 服务器: {} | 频道: {} | 消息: {} | 通知数: {}",
            server,
            channel,
            preview_compact(message, 60),
            highlights.len()
        );
        Ok(highlights.len())
    }

    /// 为发送者订阅触发词
    /// 触发词在这里完成校验，非法触发词以配置错误返回
    pub async fn subscribe(
        &self,
        server: &str,
        hostmask: &str,
        channel: &str,
        trigger: &str,
    ) -> HlResult<SubscribeOutcome> {
        if !self
            .identity
            .has_permission(server, channel, hostmask, HIGHLIGHT_PERMISSION)
            .await?
        {
            return Ok(SubscribeOutcome::NotAuthorized);
        }

        let Some(username) = self.identity.resolve_username(server, hostmask).await? else {
            return Ok(SubscribeOutcome::UnknownUser);
        };

        let pattern = PatternCompiler::compile(trigger, self.config())?;
        let outcome = self
            .store
            .add_recipient(server, channel, &pattern, &username)
            .await?;

        debug!("订阅触发词 | 用户: {} | 频道: {} | 触发词: {} | 结果: {:?}", username, channel, trigger, outcome);
        Ok(match outcome {
            AddOutcome::Added => SubscribeOutcome::Added,
            AddOutcome::AlreadyPresent => SubscribeOutcome::AlreadySubscribed,
        })
    }

    fn format_timestamp(&self, now: NaiveDateTime) -> String {
        let mut timestamp = String::new();
        if write!(timestamp, "{}", now.format(&self.config().timestamp_format)).is_err() {
            warn!("时间戳格式无效，回退默认格式 | 格式: {}", self.config().timestamp_format);
            timestamp.clear();
            // 默认格式固定有效
            let _ = write!(timestamp, "{}", now.format(FALLBACK_TIMESTAMP_FORMAT));
        }
        timestamp
    }
}
