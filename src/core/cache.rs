//! Two-tier TTL cache for stats API responses
//!
//! - L1 Cache: In-memory LRU cache for fast access within one run
//! - L2 Cache: JSON files under the cache directory, shared between runs
//!
//! Every entry carries the time it was fetched. An entry older than the
//! cache's TTL is treated as absent in both tiers, which bounds how stale a
//! roster or stat line can get.

use lru::LruCache;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    config::CacheSettings,
    nba::types::{GameLogEntry, RosterEntry, SeasonAverages, TeamDefense},
    PlayerId, Season, TeamId, CACHE_DIR_ENV_VAR,
};

/// Root directory for cached files: `$NBA_INTEL_CACHE_DIR`, else
/// `~/.cache/nba-intel`.
pub fn cache_root() -> PathBuf {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV_VAR) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("nba-intel")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Where a loader's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Generate a string representation for file system storage
    fn to_file_key(&self) -> String;

    /// Generate the file path for this cache entry
    fn to_file_path(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.json", self.to_file_key()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterCacheKey {
    pub team_id: TeamId,
    pub season: Season,
}

impl CacheKey for RosterCacheKey {
    fn to_file_key(&self) -> String {
        format!(
            "roster_t{}_s{}",
            self.team_id.as_u32(),
            self.season.start_year()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonAveragesCacheKey {
    pub player_id: PlayerId,
    pub season: Season,
}

impl CacheKey for SeasonAveragesCacheKey {
    fn to_file_key(&self) -> String {
        format!(
            "season_averages_p{}_s{}",
            self.player_id.as_u64(),
            self.season.start_year()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameLogCacheKey {
    pub player_id: PlayerId,
    pub season: Season,
}

impl CacheKey for GameLogCacheKey {
    fn to_file_key(&self) -> String {
        format!(
            "game_log_p{}_s{}",
            self.player_id.as_u64(),
            self.season.start_year()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefenseCacheKey {
    pub season: Season,
}

impl CacheKey for DefenseCacheKey {
    fn to_file_key(&self) -> String {
        format!("team_defense_s{}", self.season.start_year())
    }
}

/// What is stored in both tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry<V> {
    fetched_at: u64,
    value: V,
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    memory_cache: Arc<Mutex<LruCache<K, CacheEntry<V>>>>,
    memory_capacity: usize,
    ttl: Duration,
    root: PathBuf,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Create a cache with a memory capacity, a TTL and a directory for the
    /// file tier.
    pub fn new(memory_capacity: usize, ttl: Duration, root: impl Into<PathBuf>) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            memory_capacity: capacity.get(),
            ttl,
            root: root.into(),
        }
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, CacheEntry<V>>> {
        self.memory_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_fresh(&self, fetched_at: u64) -> bool {
        now_secs().saturating_sub(fetched_at) < self.ttl.as_secs()
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let mut memory = self.memory();
            let cached = memory
                .get(key)
                .map(|entry| (entry.fetched_at, entry.value.clone()));
            if let Some((fetched_at, value)) = cached {
                if self.is_fresh(fetched_at) {
                    return Some(value);
                }
                memory.pop(key);
            }
        }

        let entry = self.get_from_disk(key)?;
        if !self.is_fresh(entry.fetched_at) {
            tracing::debug!(key = %key.to_file_key(), "cache entry expired");
            return None;
        }

        // Promote to memory cache
        let value = entry.value.clone();
        self.memory().put(key.clone(), entry);
        Some(value)
    }

    /// Put an item into cache (stores in both memory and disk)
    pub fn put(&self, key: K, value: V) {
        self.put_at(key, value, now_secs());
    }

    /// Put an item with an explicit fetch time (unix seconds).
    pub fn put_at(&self, key: K, value: V, fetched_at: u64) {
        let entry = CacheEntry { fetched_at, value };

        if let Err(e) = self.put_to_disk(&key, &entry) {
            tracing::debug!(key = %key.to_file_key(), error = %e, "could not write cache file");
        }
        self.memory().put(key, entry);
    }

    /// Get item from disk cache only
    fn get_from_disk(&self, key: &K) -> Option<CacheEntry<V>> {
        let path = key.to_file_path(&self.root);
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    /// Put item to disk cache only
    fn put_to_disk(&self, key: &K, entry: &CacheEntry<V>) -> std::io::Result<()> {
        let path = key.to_file_path(&self.root);
        let content = serde_json::to_string_pretty(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&path, &content)
    }

    /// Drop an entry from both tiers.
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        self.memory().pop(key);
        let path = key.to_file_path(&self.root);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// Get memory cache statistics
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// One cache per stats endpoint, each with its own TTL.
pub struct CacheManager {
    pub rosters: UnifiedCache<RosterCacheKey, Vec<RosterEntry>>,
    pub season_averages: UnifiedCache<SeasonAveragesCacheKey, Option<SeasonAverages>>,
    pub game_logs: UnifiedCache<GameLogCacheKey, Vec<GameLogEntry>>,
    pub defenses: UnifiedCache<DefenseCacheKey, Vec<TeamDefense>>,
}

impl CacheManager {
    pub fn new(settings: &CacheSettings) -> Self {
        Self::with_root(settings, cache_root())
    }

    pub fn with_root(settings: &CacheSettings, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            rosters: UnifiedCache::new(30, settings.roster_ttl(), root.clone()),
            season_averages: UnifiedCache::new(200, settings.averages_ttl(), root.clone()),
            game_logs: UnifiedCache::new(200, settings.game_log_ttl(), root.clone()),
            defenses: UnifiedCache::new(10, settings.defense_ttl(), root),
        }
    }

    /// Clear all memory caches
    pub fn clear_all_memory(&self) {
        self.rosters.clear_memory();
        self.season_averages.clear_memory();
        self.game_logs.clear_memory();
        self.defenses.clear_memory();
    }

    /// Get memory usage statistics for all caches
    pub fn memory_stats(&self) -> HashMap<String, (usize, usize)> {
        let mut stats = HashMap::new();
        stats.insert("rosters".to_string(), self.rosters.memory_stats());
        stats.insert(
            "season_averages".to_string(),
            self.season_averages.memory_stats(),
        );
        stats.insert("game_logs".to_string(), self.game_logs.memory_stats());
        stats.insert("defenses".to_string(), self.defenses.memory_stats());
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn key(team: u32) -> RosterCacheKey {
        RosterCacheKey {
            team_id: TeamId::new(team),
            season: Season::new(2025),
        }
    }

    #[test]
    fn test_try_read_to_string_existing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        fs::write(&file_path, "hello world").unwrap();

        let content = try_read_to_string(&file_path);
        assert_eq!(content, Some("hello world".to_string()));
    }

    #[test]
    fn test_try_read_to_string_nonexistent_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nonexistent.txt");

        assert_eq!(try_read_to_string(&file_path), None);
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("subdir").join("output.txt");

        write_string(&file_path, "test content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "test content");
    }

    #[test]
    fn test_cache_key_generation() {
        assert_eq!(key(1610612747).to_file_key(), "roster_t1610612747_s2025");
        assert_eq!(
            SeasonAveragesCacheKey {
                player_id: PlayerId::new(2544),
                season: Season::new(2024),
            }
            .to_file_key(),
            "season_averages_p2544_s2024"
        );
        assert_eq!(
            GameLogCacheKey {
                player_id: PlayerId::new(2544),
                season: Season::new(2025),
            }
            .to_file_key(),
            "game_log_p2544_s2025"
        );
        assert_eq!(
            DefenseCacheKey {
                season: Season::new(2025)
            }
            .to_file_key(),
            "team_defense_s2025"
        );
        let root = Path::new("/tmp/nba");
        assert_eq!(
            key(1).to_file_path(root),
            PathBuf::from("/tmp/nba/roster_t1_s2025.json")
        );
    }

    #[test]
    fn test_put_then_get_from_memory() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<RosterCacheKey, String> =
            UnifiedCache::new(2, Duration::from_secs(3600), dir.path());

        cache.put(key(1), "one".to_string());
        assert_eq!(cache.get(&key(1)), Some("one".to_string()));
        assert_eq!(cache.get(&key(2)), None);
    }

    #[test]
    fn test_lru_eviction_keeps_capacity() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<RosterCacheKey, String> =
            UnifiedCache::new(2, Duration::from_secs(3600), dir.path());

        cache.put(key(1), "one".to_string());
        cache.put(key(2), "two".to_string());
        cache.put(key(3), "three".to_string());

        assert_eq!(cache.memory_stats(), (2, 2));
        // Evicted from memory but still on disk
        assert_eq!(cache.get(&key(1)), Some("one".to_string()));
    }

    #[test]
    fn test_disk_tier_shared_between_instances() {
        let dir = tempdir().unwrap();
        let first: UnifiedCache<RosterCacheKey, Vec<u32>> =
            UnifiedCache::new(4, Duration::from_secs(3600), dir.path());
        first.put(key(7), vec![1, 2, 3]);

        let second: UnifiedCache<RosterCacheKey, Vec<u32>> =
            UnifiedCache::new(4, Duration::from_secs(3600), dir.path());
        assert_eq!(second.memory_stats().0, 0);
        assert_eq!(second.get(&key(7)), Some(vec![1, 2, 3]));
        assert_eq!(second.memory_stats().0, 1);
    }

    #[test]
    fn test_expired_entries_are_misses() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<RosterCacheKey, String> =
            UnifiedCache::new(4, Duration::from_secs(3600), dir.path());

        cache.put_at(key(1), "stale".to_string(), now_secs() - 7200);
        assert_eq!(cache.get(&key(1)), None);

        cache.clear_memory();
        assert_eq!(cache.get(&key(1)), None);

        cache.put_at(key(2), "fresh".to_string(), now_secs() - 60);
        assert_eq!(cache.get(&key(2)), Some("fresh".to_string()));
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<RosterCacheKey, String> =
            UnifiedCache::new(4, Duration::ZERO, dir.path());

        cache.put(key(1), "value".to_string());
        assert_eq!(cache.get(&key(1)), None);
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<RosterCacheKey, String> =
            UnifiedCache::new(4, Duration::from_secs(3600), dir.path());

        fs::write(key(9).to_file_path(dir.path()), "{not json").unwrap();
        assert_eq!(cache.get(&key(9)), None);
    }

    #[test]
    fn test_invalidate_removes_both_tiers() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<RosterCacheKey, String> =
            UnifiedCache::new(4, Duration::from_secs(3600), dir.path());

        cache.put(key(1), "value".to_string());
        assert!(key(1).to_file_path(dir.path()).exists());

        cache.invalidate(&key(1)).unwrap();
        assert!(!key(1).to_file_path(dir.path()).exists());
        assert_eq!(cache.get(&key(1)), None);

        // Invalidating a missing key is fine
        cache.invalidate(&key(2)).unwrap();
    }

    #[test]
    fn test_cache_manager_creation() {
        let dir = tempdir().unwrap();
        let manager = CacheManager::with_root(&CacheSettings::default(), dir.path());
        let stats = manager.memory_stats();

        for name in ["rosters", "season_averages", "game_logs", "defenses"] {
            assert_eq!(stats[name].0, 0, "{} should start empty", name);
        }
        assert_eq!(manager.defenses.ttl(), Duration::from_secs(86400));
        assert_eq!(manager.rosters.ttl(), Duration::from_secs(3600));

        manager.defenses.put(DefenseCacheKey { season: Season::new(2025) }, Vec::new());
        assert_eq!(manager.memory_stats()["defenses"].0, 1);
        manager.clear_all_memory();
        assert_eq!(manager.memory_stats()["defenses"].0, 0);
    }
}
