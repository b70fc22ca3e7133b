mod ast;
mod cache;
pub(crate) mod engine;
mod escape;
mod parser;
mod render;
mod render_context;

pub use ast::Token;
pub use cache::PartialCache;
pub use engine::{DEFAULT_MAX_PARTIAL_DEPTH, Partials, RenderOptions, Template, compile};
pub use escape::escape_html;
pub use parser::parse;
