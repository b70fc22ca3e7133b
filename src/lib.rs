//! A small logic-less template engine.
//!
//! Templates are compiled once into a token tree and rendered any number of times:
//!
//! ```
//! use std::collections::HashMap;
//! use ustache::{Partials, ToValue, compile};
//!
//! let template = compile("{{> greet}}, you have {{#items}}[{{.}}]{{/items}}").unwrap();
//!
//! let mut data = HashMap::new();
//! data.insert("name".to_string(), "Amy".to_value());
//! data.insert("items".to_string(), vec![1, 2].to_value());
//!
//! let mut partials = Partials::new();
//! partials.insert("greet".to_string(), "Hi {{name}}".to_string());
//!
//! assert_eq!(template.render(&data, Some(&partials)), "Hi Amy, you have [1][2]");
//! ```
pub mod data;
pub mod error;
pub mod tpl;

pub use data::serializer::to_value;
pub use data::value::{Lambda, ToValue, Value};
pub use error::{Result, SectionErrorKind, TemplateError};
pub use tpl::{
    DEFAULT_MAX_PARTIAL_DEPTH, PartialCache, Partials, RenderOptions, Template, Token, compile,
    escape_html, parse,
};
pub use ustache_macros::ToValue;
