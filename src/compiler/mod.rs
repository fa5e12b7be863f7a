//! 编译模块：将原始触发词编译为可执行的匹配模式
pub mod pattern;
pub mod compiler;

pub use self::pattern::{Pattern, Span};
pub use self::compiler::PatternCompiler;
