use crate::error::Result;
use crate::tpl::ast::Token;
use crate::tpl::parser::parse;
use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone)]
struct CachedPartial {
    tokens: Arc<Vec<Token>>,
    content_hash: u64,
    source: String,
}

/// Opt-in cache of parsed partial bodies.
///
/// Entries are keyed by partial name and validated against the source text (a hash of it is
/// checked first), so handing the renderer a different body under the same name re-parses it. Without a cache every
/// partial tag parses its body again on each render.
#[derive(Default)]
pub struct PartialCache {
    entries: DashMap<String, CachedPartial>,
}

impl PartialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached tree for `name` when `source` is unchanged, parsing and storing it
    /// otherwise. Sources that fail to parse are not cached.
    pub(crate) fn get_or_parse(&self, name: &str, source: &str) -> Result<Arc<Vec<Token>>> {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        let new_hash = hasher.finish();

        if let Some(cached) = self.entries.get(name)
            && cached.content_hash == new_hash
            && cached.source == source
        {
            return Ok(cached.tokens.clone());
        }

        let tokens = Arc::new(parse(source)?);
        log::debug!("Cached partial \"{}\" ({} tokens)", name, tokens.len());
        self.entries.insert(
            name.to_string(),
            CachedPartial {
                tokens: tokens.clone(),
                content_hash: new_hash,
                source: source.to_string(),
            },
        );
        Ok(tokens)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the cached tree for one partial.
    pub fn remove(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
