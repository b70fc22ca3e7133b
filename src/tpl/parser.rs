use crate::error::{Result, TemplateError};
use crate::tpl::ast::Token;

const OPEN_TAG: &str = "{{";

/// Kind of a section that is still waiting for its close tag.
#[derive(Clone, Copy)]
enum SectionKind {
    Normal,
    Inverted,
}

/// Represents a stack frame for an open section.
///
/// When `{{#name}}` or `{{^name}}` is encountered a frame is pushed; the matching `{{/name}}`
/// pops it and turns the collected children into a section token.
struct TagFrame {
    kind: SectionKind,
    name: String,
}

/// Single pass parser over the chunks produced by [`split_chunks`].
///
/// Even chunks are literal text, odd chunks are tag bodies. Nested sections are tracked with
/// two parallel stacks: `nodes_stack` holds the children collected for every open scope (the
/// first element is the root) and `tag_stack` holds the open sections themselves.
struct Parser {
    nodes_stack: Vec<Vec<Token>>,
    tag_stack: Vec<TagFrame>,
}

impl Parser {
    fn new() -> Self {
        Self {
            nodes_stack: vec![Vec::new()],
            tag_stack: Vec::new(),
        }
    }

    fn parse(mut self, template: &str) -> Result<Vec<Token>> {
        let normalized = normalize_close_tags(template);

        for (index, chunk) in normalized.split(OPEN_TAG).enumerate() {
            if chunk.is_empty() {
                continue;
            }

            if index % 2 == 0 {
                self.append_node(Token::Text(chunk.to_string()));
            } else {
                self.parse_tag(chunk)?;
            }
        }

        // A section left open at the end of input would lose its children.
        if let Some(frame) = self.tag_stack.last() {
            return Err(TemplateError::unclosed(&frame.name));
        }

        Ok(self.nodes_stack.pop().unwrap_or_default())
    }

    fn parse_tag(&mut self, chunk: &str) -> Result<()> {
        let mut chars = chunk.chars();
        let sigil = chars.next();
        let name = chars.as_str().trim();

        match sigil {
            Some('!') => {}
            Some('#') => self.open_section(SectionKind::Normal, name),
            Some('^') => self.open_section(SectionKind::Inverted, name),
            Some('>') => self.append_node(Token::Partial {
                name: name.to_string(),
            }),
            Some('&') | Some('{') => self.append_node(Token::Raw(name.to_string())),
            Some('/') => self.close_section(name)?,
            _ => self.append_node(Token::Name(chunk.trim().to_string())),
        }
        Ok(())
    }

    fn open_section(&mut self, kind: SectionKind, name: &str) {
        self.nodes_stack.push(Vec::new());
        self.tag_stack.push(TagFrame {
            kind,
            name: name.to_string(),
        });
    }

    /// Handle `{{/name}}`: only the innermost open section may be closed.
    fn close_section(&mut self, name: &str) -> Result<()> {
        let frame = self
            .tag_stack
            .pop()
            .ok_or_else(|| TemplateError::unopened(name))?;

        if frame.name != name {
            return Err(TemplateError::unclosed(&frame.name));
        }

        let children = self.nodes_stack.pop().unwrap_or_default();
        let node = match frame.kind {
            SectionKind::Normal => Token::Section {
                name: frame.name,
                children,
            },
            SectionKind::Inverted => Token::InvertedSection {
                name: frame.name,
                children,
            },
        };
        self.append_node(node);
        Ok(())
    }

    /// Append a node to the current active scope.
    fn append_node(&mut self, node: Token) {
        if let Some(nodes) = self.nodes_stack.last_mut() {
            nodes.push(node);
        }
    }
}

/// Parses a template into its token tree.
///
/// Fails for an empty template and for section tags that do not pair up.
pub fn parse(template: &str) -> Result<Vec<Token>> {
    if template.is_empty() {
        return Err(TemplateError::InvalidTemplate);
    }
    Parser::new().parse(template)
}

/// Rewrites every `}}` and `}}}` to `{{` so a single split on `{{` alternates between text and
/// tag bodies. Closers are matched left to right, each taking a third brace when one follows.
fn normalize_close_tags(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find("}}") {
        out.push_str(&rest[..idx]);
        out.push_str(OPEN_TAG);
        rest = &rest[idx + 2..];
        if let Some(stripped) = rest.strip_prefix('}') {
            rest = stripped;
        }
    }
    out.push_str(rest);
    out
}
