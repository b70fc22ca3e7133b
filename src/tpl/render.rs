use crate::data::value::Value;
use crate::tpl::ast::Token;
use crate::tpl::engine::RenderOptions;
use crate::tpl::escape::push_escaped;
use crate::tpl::parser::parse;
use crate::tpl::render_context::Context;
use std::sync::Arc;

pub(crate) struct RenderBuffer<'r> {
    pub output: String,
    pub options: &'r RenderOptions<'r>,
    /// Number of partials currently being expanded.
    pub depth: usize,
}

pub(crate) fn render(nodes: &[Token], ctx: &Context, buf: &mut RenderBuffer) {
    for node in nodes {
        match node {
            Token::Text(t) => buf.output.push_str(t),
            Token::Name(name) => {
                if let Some(v) = ctx.lookup(name).filter(|v| !v.is_empty()) {
                    push_escaped(&mut buf.output, &v.to_string());
                }
            }
            Token::Raw(name) => {
                if let Some(v) = ctx.lookup(name).filter(|v| !v.is_empty()) {
                    buf.output.push_str(&v.to_string());
                }
            }
            Token::InvertedSection { name, children } => {
                if ctx.lookup(name).is_none_or(|v| v.is_empty()) {
                    render(children, ctx, buf);
                }
            }
            Token::Section { name, children } => {
                let data = match ctx.lookup(name) {
                    Some(v) if !v.is_empty() => v,
                    _ => continue,
                };

                match &*data {
                    Value::List(items) => {
                        for item in items {
                            render_item(children, item, buf);
                        }
                    }
                    Value::Map(_) => render(children, &Context::new(&data), buf),
                    // A truthy scalar only gates the body; the context stays the same.
                    _ => render(children, ctx, buf),
                }
            }
            Token::Partial { name } => render_partial(name, ctx, buf),
        }
    }
}

/// Renders one iteration of a list section. Lists and maps become the context directly;
/// scalars are exposed under the `.` key.
fn render_item(children: &[Token], item: &Value, buf: &mut RenderBuffer) {
    if item.is_object() {
        render(children, &Context::new(item), buf);
    } else {
        let scoped: Value = std::iter::once((".".to_string(), item.clone())).collect();
        render(children, &Context::new(&scoped), buf);
    }
}

fn render_partial(name: &str, ctx: &Context, buf: &mut RenderBuffer) {
    let options = buf.options;
    let source = match options.partials.and_then(|partials| partials.get(name)) {
        Some(source) if !source.is_empty() => source,
        _ => return,
    };

    if buf.depth >= options.max_partial_depth {
        log::warn!(
            "Skipping partial \"{}\": nesting depth limit {} reached",
            name,
            options.max_partial_depth
        );
        return;
    }

    let tokens = match options.cache {
        Some(cache) => cache.get_or_parse(name, source),
        None => parse(source).map(Arc::new),
    };

    match tokens {
        Ok(tokens) => {
            buf.depth += 1;
            render(&tokens, ctx, buf);
            buf.depth -= 1;
        }
        Err(e) => log::warn!("Skipping partial \"{}\": {}", name, e),
    }
}
