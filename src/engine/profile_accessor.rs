// ==========================================
// 交期报价系统 - 档位配置访问器
// ==========================================
// 职责: 解析 (组织, 工艺) 的交期档位配置与组织时区/节假日,
//       带缓存 (TTL 长于产能数据: 读多写少)
// ==========================================

use crate::cache::CacheStore;
use crate::domain::profile::LeadtimeProfile;
use crate::engine::cache_keys;
use crate::engine::error::EngineResult;
use crate::repository::{OrgRepository, ProfileRepository};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

/// 档位配置缓存 TTL
pub const PROFILE_TTL: Duration = Duration::from_secs(300);

/// 组织时区/节假日缓存 TTL
pub const ORG_TTL: Duration = Duration::from_secs(3600);

/// 档位配置访问器
pub struct ProfileAccessor {
    /// 档位配置仓储
    profile_repo: Arc<ProfileRepository>,
    /// 组织仓储
    org_repo: Arc<OrgRepository>,
    /// 缓存客户端 (显式注入)
    cache: Arc<dyn CacheStore>,
}

impl ProfileAccessor {
    /// 创建新的档位配置访问器
    pub fn new(
        profile_repo: Arc<ProfileRepository>,
        org_repo: Arc<OrgRepository>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            profile_repo,
            org_repo,
            cache,
        }
    }

    /// 读取档位配置;无配置返回 None (由编排器降级)
    ///
    /// 存储读失败上抛: 配置读不出来意味着整个请求只能走降级响应
    pub async fn profile(
        &self,
        org_id: &str,
        process: &str,
    ) -> EngineResult<Option<LeadtimeProfile>> {
        let cache_key = cache_keys::profile_key(org_id, process);
        if let Some(cached) = self.cache.get(&cache_key).await? {
            match serde_json::from_str::<LeadtimeProfile>(&cached) {
                Ok(profile) => return Ok(Some(profile)),
                Err(e) => {
                    tracing::warn!("档位配置缓存解码失败,按未命中处理 key={}: {}", cache_key, e);
                }
            }
        }

        let profile = self.profile_repo.find(org_id, process)?;

        if let Some(profile) = &profile {
            let payload = serde_json::to_string(profile)?;
            self.cache
                .set_with_ttl(&cache_key, payload, PROFILE_TTL)
                .await?;
        }

        Ok(profile)
    }

    /// 读取组织时区;组织缺失或存储读失败回退默认时区 (记日志)
    pub async fn org_timezone(&self, org_id: &str, default_timezone: &str) -> EngineResult<String> {
        let cache_key = cache_keys::timezone_key(org_id);
        if let Some(cached) = self.cache.get(&cache_key).await? {
            match serde_json::from_str::<String>(&cached) {
                Ok(timezone) => return Ok(timezone),
                Err(e) => {
                    tracing::warn!("组织时区缓存解码失败,按未命中处理 key={}: {}", cache_key, e);
                }
            }
        }

        let timezone = match self.org_repo.timezone(org_id) {
            Ok(Some(timezone)) => timezone,
            Ok(None) => default_timezone.to_string(),
            Err(e) => {
                tracing::error!("读取组织时区失败 org={}: {}", org_id, e);
                default_timezone.to_string()
            }
        };

        let payload = serde_json::to_string(&timezone)?;
        self.cache.set_with_ttl(&cache_key, payload, ORG_TTL).await?;

        Ok(timezone)
    }

    /// 读取组织节假日列表;组织缺失或存储读失败回退空列表 (记日志)
    pub async fn org_holidays(&self, org_id: &str) -> EngineResult<Vec<NaiveDate>> {
        let cache_key = cache_keys::holidays_key(org_id);
        if let Some(cached) = self.cache.get(&cache_key).await? {
            match serde_json::from_str::<Vec<NaiveDate>>(&cached) {
                Ok(holidays) => return Ok(holidays),
                Err(e) => {
                    tracing::warn!("组织节假日缓存解码失败,按未命中处理 key={}: {}", cache_key, e);
                }
            }
        }

        let holidays = match self.org_repo.holidays(org_id) {
            Ok(holidays) => holidays,
            Err(e) => {
                tracing::error!("读取组织节假日失败 org={}: {}", org_id, e);
                Vec::new()
            }
        };

        let payload = serde_json::to_string(&holidays)?;
        self.cache.set_with_ttl(&cache_key, payload, ORG_TTL).await?;

        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn setup() -> (Arc<Mutex<Connection>>, ProfileAccessor) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_leadtime_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO org (org_id, org_name, timezone, holidays) \
             VALUES ('ORG001', '示例组织', 'Asia/Kolkata', '[\"2026-03-10\"]')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO leadtime_profile \
             (id, org_id, process, econ_days, std_days, express_days, surge_multiplier) \
             VALUES ('P001', 'ORG001', 'cnc_milling', 10, 5, 2, 1.2)",
            [],
        )
        .unwrap();

        let conn = Arc::new(Mutex::new(conn));
        let accessor = ProfileAccessor::new(
            Arc::new(ProfileRepository::new(conn.clone())),
            Arc::new(OrgRepository::new(conn.clone())),
            Arc::new(MemoryCacheStore::new()),
        );
        (conn, accessor)
    }

    #[tokio::test]
    async fn test_profile_found_and_cached() {
        let (conn, accessor) = setup();

        let profile = accessor.profile("ORG001", "cnc_milling").await.unwrap().unwrap();
        assert_eq!(profile.econ_days, 10);

        // 删除底层行后仍命中缓存
        {
            let c = conn.lock().unwrap();
            c.execute("DELETE FROM leadtime_profile", []).unwrap();
        }
        let cached = accessor.profile("ORG001", "cnc_milling").await.unwrap();
        assert!(cached.is_some());
    }

    #[tokio::test]
    async fn test_profile_missing_is_none_and_not_cached() {
        let (_conn, accessor) = setup();
        assert!(accessor
            .profile("ORG001", "sheet_metal")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_org_timezone_defaults_when_missing() {
        let (_conn, accessor) = setup();
        assert_eq!(
            accessor.org_timezone("ORG001", "UTC").await.unwrap(),
            "Asia/Kolkata"
        );
        assert_eq!(accessor.org_timezone("ORG404", "UTC").await.unwrap(), "UTC");
    }

    #[tokio::test]
    async fn test_org_timezone_defaults_on_storage_error() {
        let (conn, accessor) = setup();
        {
            let c = conn.lock().unwrap();
            c.execute("DROP TABLE org", []).unwrap();
        }
        assert_eq!(accessor.org_timezone("ORG001", "UTC").await.unwrap(), "UTC");
    }

    #[tokio::test]
    async fn test_org_holidays() {
        let (_conn, accessor) = setup();
        let holidays = accessor.org_holidays("ORG001").await.unwrap();
        assert_eq!(holidays, vec!["2026-03-10".parse::<NaiveDate>().unwrap()]);
        assert!(accessor.org_holidays("ORG404").await.unwrap().is_empty());
    }
}
