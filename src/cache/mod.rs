// ==========================================
// 交期报价系统 - 缓存层
// ==========================================
// 职责: 定义键值缓存接口 (TTL 语义) 与进程内实现
// 架构原则:
// - 缓存客户端经构造函数显式注入,不使用模块级单例
// - 写入幂等,后写覆盖;短 TTL 下竞争最多造成一次冗余重算
// ==========================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

// ==========================================
// 缓存层错误类型
// ==========================================

/// 缓存层错误
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("缓存锁获取失败: {0}")]
    LockError(String),

    #[error("缓存后端错误: {0}")]
    BackendError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type CacheResult<T> = Result<T, CacheError>;

// ==========================================
// Trait: CacheStore
// ==========================================
// 值一律为 JSON 字符串,由调用方负责编解码
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 读取键值;不存在或已过期返回 None
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// 写入键值并设置 TTL
    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;

    /// 删除键 (不存在时静默成功)
    async fn del(&self, key: &str) -> CacheResult<()>;

    /// 按模式列出键;支持尾部 '*' 前缀匹配,否则精确匹配
    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>>;
}

// ==========================================
// MemoryCacheStore - 进程内 TTL 缓存
// ==========================================

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// 进程内键值缓存
///
/// 读取时惰性清理过期条目
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    /// 创建空缓存
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 模式匹配: 尾部 '*' 做前缀匹配,否则精确匹配
fn key_matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::LockError(e.to_string()))?;

        let now = Instant::now();
        if let Some(entry) = entries.get(key) {
            if entry.is_expired(now) {
                entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }

        Ok(None)
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::LockError(e.to_string()))?;

        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::LockError(e.to_string()))?;

        entries.remove(key);
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::LockError(e.to_string()))?;

        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired(now));

        let mut keys: Vec<String> = entries
            .keys()
            .filter(|k| key_matches(pattern, k))
            .cloned()
            .collect();
        keys.sort();

        Ok(keys)
    }
}
