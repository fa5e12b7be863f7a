//! 渲染模块：把命中区间渲染为带高亮标记的文本
pub mod html_renderer;

pub use self::html_renderer::{HighlightRenderer, RenderedHighlight, escape_markup};
