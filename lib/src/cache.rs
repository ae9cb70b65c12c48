//! Session-lifetime memo of finished renders

use crate::config::{HorizontalLayout, RenderConfig};
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Identifies one render: the full text plus every [`RenderConfig`] field
///
/// Fields are kept apart rather than joined into a string, so no text can
/// collide with a different text/config combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    font: String,
    horizontal_layout: HorizontalLayout,
    width: u32,
    whitespace_break: bool,
}

impl CacheKey {
    pub fn new(text: &str, config: &RenderConfig) -> Self {
        Self {
            text: text.to_string(),
            font: config.font.clone(),
            horizontal_layout: config.horizontal_layout,
            width: config.width,
            whitespace_break: config.whitespace_break,
        }
    }
}

/// Unbounded map from [`CacheKey`] to rendered art
///
/// Entries are never evicted. Access goes through a mutex because renders
/// finish on worker threads; a lookup followed by an insert is not atomic,
/// so two racing renders of the same key may both do the work.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: Mutex<HashMap<CacheKey, String>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let hit = self.entries.lock().get(key).cloned();
        debug!(
            "Render cache {} for {:?}",
            if hit.is_some() { "hit" } else { "miss" },
            key.text
        );
        hit
    }

    pub fn put(&self, key: CacheKey, value: String) {
        self.entries.lock().insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_put() {
        let cache = RenderCache::new();
        let key = CacheKey::new("HI", &RenderConfig::default());
        assert_eq!(cache.get(&key), None);

        cache.put(key.clone(), "art".to_string());
        assert_eq!(cache.get(&key).as_deref(), Some("art"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_identical_requests_share_key() {
        let a = CacheKey::new("hello", &RenderConfig::default());
        let b = CacheKey::new("hello", &RenderConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_config_field_participates() {
        let base = RenderConfig::default();
        let key = CacheKey::new("hello", &base);

        let variants = [
            RenderConfig {
                font: "Slant".to_string(),
                ..base.clone()
            },
            RenderConfig {
                horizontal_layout: HorizontalLayout::Full,
                ..base.clone()
            },
            RenderConfig {
                width: base.width + 1,
                ..base.clone()
            },
            RenderConfig {
                whitespace_break: !base.whitespace_break,
                ..base.clone()
            },
        ];
        for config in &variants {
            assert_ne!(CacheKey::new("hello", config), key);
        }
    }

    #[test]
    fn test_delimiter_like_text_does_not_collide() {
        // Joined with "-", these two would both read "a-b-Standard"
        let a = CacheKey::new(
            "a-b",
            &RenderConfig {
                font: "Standard".to_string(),
                ..Default::default()
            },
        );
        let b = CacheKey::new(
            "a",
            &RenderConfig {
                font: "b-Standard".to_string(),
                ..Default::default()
            },
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = RenderCache::new();
        let key = CacheKey::new("x", &RenderConfig::default());
        cache.put(key.clone(), "one".to_string());
        cache.put(key.clone(), "two".to_string());
        assert_eq!(cache.get(&key).as_deref(), Some("two"));
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }
}
