//! 规则模块：负责规则数据模型定义与规则存储契约
pub mod model;
pub mod store;

// 导出核心接口
pub use self::model::{Recipient, Rule, RuleSet};
pub use self::store::{AddOutcome, ConfigStore, InMemoryConfigStore};
