/// One node of a compiled template.
///
/// Sections own their children, so a parsed template is a plain tree with no back
/// references and can be shared freely once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text copied to the output.
    Text(String),
    /// `{{name}}`: HTML-escaped interpolation.
    Name(String),
    /// `{{{name}}}` or `{{&name}}`: unescaped interpolation.
    Raw(String),
    /// `{{#name}}...{{/name}}`
    Section { name: String, children: Vec<Token> },
    /// `{{^name}}...{{/name}}`
    InvertedSection { name: String, children: Vec<Token> },
    /// `{{>name}}`
    Partial { name: String },
}
