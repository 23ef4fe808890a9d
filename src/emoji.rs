//! Recently used emojis, persisted through the local cache as a JSON array.

use crate::error::Result;
use crate::persist::LocalCache;

/// Shown until the user has picked anything.
pub const DEFAULT_RECENT: [&str; 8] = ["😀", "👍", "❤️", "🎉", "✅", "📝", "💡", "🚀"];

/// Most-recently-used list, newest first, without duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentEmojis {
    items: Vec<String>,
    limit: usize,
    key: String,
}

impl RecentEmojis {
    /// Load the list stored under `key`.
    ///
    /// Missing or unreadable data yields the default list; corruption is
    /// logged, not reported.
    pub fn load(cache: &impl LocalCache, key: &str, limit: usize) -> Self {
        let items = match cache.get(key) {
            None => defaults(),
            Some(json) => serde_json::from_str::<Vec<String>>(&json).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "ignoring corrupt recent emoji list");
                defaults()
            }),
        };
        let mut recent = Self {
            items,
            limit,
            key: key.to_string(),
        };
        recent.items.truncate(limit);
        recent
    }

    /// Newest first.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Move `emoji` to the front and persist the list.
    pub fn record(&mut self, emoji: &str, cache: &mut impl LocalCache) -> Result<()> {
        self.items.retain(|e| e != emoji);
        self.items.insert(0, emoji.to_string());
        self.items.truncate(self.limit);
        cache.set(&self.key, &serde_json::to_string(&self.items)?)
    }
}

fn defaults() -> Vec<String> {
    DEFAULT_RECENT.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryCache;

    #[test]
    fn test_defaults_when_absent() {
        let cache = MemoryCache::new();
        let recent = RecentEmojis::load(&cache, "emoji_recent", 32);
        assert_eq!(recent.items().len(), 8);
        assert_eq!(recent.items()[0], "😀");
    }

    #[test]
    fn test_record_moves_to_front_and_dedupes() {
        let mut cache = MemoryCache::new();
        let mut recent = RecentEmojis::load(&cache, "emoji_recent", 32);
        recent.record("🚀", &mut cache).unwrap();
        assert_eq!(recent.items()[0], "🚀");
        assert_eq!(recent.items().iter().filter(|e| *e == "🚀").count(), 1);
        assert_eq!(recent.items().len(), 8);

        let reloaded = RecentEmojis::load(&cache, "emoji_recent", 32);
        assert_eq!(reloaded, recent);
    }

    #[test]
    fn test_limit() {
        let mut cache = MemoryCache::new();
        let mut recent = RecentEmojis::load(&cache, "emoji_recent", 3);
        assert_eq!(recent.items().len(), 3);
        recent.record("🐢", &mut cache).unwrap();
        assert_eq!(recent.items(), ["🐢", "😀", "👍"]);
    }

    #[test]
    fn test_corrupt_data_falls_back() {
        let mut cache = MemoryCache::new();
        cache.set("emoji_recent", "not json").unwrap();
        let recent = RecentEmojis::load(&cache, "emoji_recent", 32);
        assert_eq!(recent.items().len(), DEFAULT_RECENT.len());
    }
}
