//! 身份解析契约
//! 把发送者 hostmask 解析为规范用户名，并回答权限查询

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::HlResult;
use crate::rule::Recipient;

/// 身份解析契约
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// 解析用户名，未知身份返回 `None`
    async fn resolve_username(&self, server: &str, hostmask: &str) -> HlResult<Option<Recipient>>;

    /// 权限查询
    async fn has_permission(
        &self,
        server: &str,
        channel: &str,
        hostmask: &str,
        permission: &str,
    ) -> HlResult<bool>;
}

/// 静态身份表（测试与简单宿主使用，不区分服务器）
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    users: FxHashMap<String, Recipient>,
    grants: FxHashSet<(String, String, String)>,
    allow_all: bool,
}

impl StaticIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记 hostmask → 用户名
    pub fn with_user(mut self, hostmask: impl Into<String>, username: impl Into<Recipient>) -> Self {
        self.users.insert(hostmask.into(), username.into());
        self
    }

    /// 授予某频道上的权限
    pub fn grant(
        mut self,
        channel: impl Into<String>,
        hostmask: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        self.grants.insert((channel.into(), hostmask.into(), permission.into()));
        self
    }

    /// 所有权限查询均放行
    pub fn allow_all(mut self) -> Self {
        self.allow_all = true;
        self
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve_username(&self, _server: &str, hostmask: &str) -> HlResult<Option<Recipient>> {
        Ok(self.users.get(hostmask).cloned())
    }

    async fn has_permission(
        &self,
        _server: &str,
        channel: &str,
        hostmask: &str,
        permission: &str,
    ) -> HlResult<bool> {
        if self.allow_all {
            return Ok(true);
        }
        let key = (channel.to_string(), hostmask.to_string(), permission.to_string());
        Ok(self.grants.contains(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_known_and_unknown() {
        let resolver = StaticIdentityResolver::new().with_user("alice!a@host", "alice");

        assert_eq!(
            resolver.resolve_username("irc", "alice!a@host").await.unwrap(),
            Some("alice".to_string())
        );
        assert_eq!(resolver.resolve_username("irc", "mallory!m@host").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_permissions_are_per_channel() {
        let resolver = StaticIdentityResolver::new().grant("#rust", "alice!a@host", "highlight");

        assert!(resolver.has_permission("irc", "#rust", "alice!a@host", "highlight").await.unwrap());
        assert!(!resolver.has_permission("irc", "#go", "alice!a@host", "highlight").await.unwrap());
        assert!(!resolver.has_permission("irc", "#rust", "alice!a@host", "admin").await.unwrap());

        let open = StaticIdentityResolver::new().allow_all();
        assert!(open.has_permission("irc", "#go", "anyone", "highlight").await.unwrap());
    }
}
