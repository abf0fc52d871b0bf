/*!
 * Translation caching functionality.
 *
 * Documents often repeat paragraphs (headings, boilerplate, signatures).
 * Translation is a pure function of (text, source, target), so repeated
 * paragraphs are served from memory instead of hitting the backend again.
 */

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use log::trace;

/// Cache key combining source text, source language, and target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source_text: String,
    source_language: String,
    target_language: String,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, String>,
    hits: usize,
    misses: usize,
}

/// Shared translation cache, clones point at the same storage
#[derive(Debug, Clone)]
pub struct TranslationCache {
    state: Arc<RwLock<CacheState>>,
    enabled: bool,
}

/// Hit/miss counters of a cache
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            enabled,
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, source_text: &str, source_language: &str, target_language: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };

        let mut state = self.state.write();
        match state.entries.get(&key).cloned() {
            Some(translation) => {
                state.hits += 1;
                trace!("Cache hit for '{}' ({} -> {})", truncate_text(source_text, 30), source_language, target_language);
                Some(translation)
            },
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, source_text: &str, source_language: &str, target_language: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };

        self.state.write().entries.insert(key, translation.to_string());
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let state = self.state.read();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
        }
    }

    /// Remove all entries and reset the counters
    pub fn clear(&self) {
        *self.state.write() = CacheState::default();
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
