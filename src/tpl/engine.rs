use crate::Result;
use crate::data::value::ToValue;
use crate::tpl::ast::Token;
use crate::tpl::cache::PartialCache;
use crate::tpl::parser::parse;
use crate::tpl::render::{self, RenderBuffer};
use crate::tpl::render_context::Context;
use std::collections::HashMap;
use std::str::FromStr;

/// Named partial bodies, unparsed.
pub type Partials = HashMap<String, String>;

/// How many partials may be expanded inside one another before further ones are skipped.
pub const DEFAULT_MAX_PARTIAL_DEPTH: usize = 64;

/// Per-render settings.
///
/// ```ignore
/// let options = RenderOptions::new()
///     .partials(&partials)
///     .cache(&cache)
///     .max_partial_depth(8);
/// let html = template.render_with(&data, &options);
/// ```
#[derive(Clone, Copy)]
pub struct RenderOptions<'a> {
    pub(crate) partials: Option<&'a Partials>,
    pub(crate) cache: Option<&'a PartialCache>,
    pub(crate) max_partial_depth: usize,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            partials: None,
            cache: None,
            max_partial_depth: DEFAULT_MAX_PARTIAL_DEPTH,
        }
    }
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partials(mut self, partials: &'a Partials) -> Self {
        self.partials = Some(partials);
        self
    }

    /// Reuse parsed partial trees across renders instead of parsing each partial per use.
    pub fn cache(mut self, cache: &'a PartialCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = depth;
        self
    }
}

/// A compiled template.
///
/// Compilation is the only step that can fail. The token tree is never modified afterwards,
/// so one `Template` can be rendered any number of times, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Parses `source` into a reusable template.
    ///
    /// # Errors
    /// `TemplateError::InvalidTemplate` for an empty source, `TemplateError::Section` when
    /// open and close tags do not pair up.
    pub fn compile(source: &str) -> Result<Self> {
        let tokens = parse(source)?;
        log::debug!("Compiled template into {} top-level tokens", tokens.len());
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Renders against `context`, expanding partials from `partials` when given.
    ///
    /// Missing names, missing partials and mismatched data all render as empty text.
    pub fn render<T: ToValue + ?Sized>(&self, context: &T, partials: Option<&Partials>) -> String {
        let options = RenderOptions {
            partials,
            ..RenderOptions::default()
        };
        self.render_with(context, &options)
    }

    pub fn render_with<T: ToValue + ?Sized>(&self, context: &T, options: &RenderOptions) -> String {
        let value = context.to_value();
        log::trace!("Rendering template ({} top-level tokens)", self.tokens.len());

        let mut buf = RenderBuffer {
            output: String::new(),
            options,
            depth: 0,
        };
        render::render(&self.tokens, &Context::new(&value), &mut buf);
        buf.output
    }
}

impl FromStr for Template {
    type Err = crate::error::TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        Template::compile(s)
    }
}

/// Shorthand for [`Template::compile`].
pub fn compile(source: &str) -> Result<Template> {
    Template::compile(source)
}
