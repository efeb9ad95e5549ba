// ==========================================
// 交期报价系统 - 产能窗口访问器
// ==========================================
// 职责: 把日集合物化为逐日产能行 (缺行合成零产能),
//       经由读穿缓存 (短 TTL,产能数据变化频繁)
// 口径: 报价热路径上存储读失败不上抛 - 记日志并降级为空结果,
//       让决策引擎按"无产能信号"处理
// ==========================================

use crate::cache::CacheStore;
use crate::domain::capacity::CapacityDay;
use crate::engine::cache_keys;
use crate::engine::error::EngineResult;
use crate::repository::CapacityRepository;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// 产能窗口缓存 TTL (秒级: 数据频繁变化,过期偏差直接影响定价)
pub const CAPACITY_WINDOW_TTL: Duration = Duration::from_secs(60);

/// 产能窗口访问器
pub struct CapacityWindowAccessor {
    /// 产能台账仓储
    repo: Arc<CapacityRepository>,
    /// 缓存客户端 (显式注入)
    cache: Arc<dyn CacheStore>,
}

impl CapacityWindowAccessor {
    /// 创建新的产能窗口访问器
    pub fn new(repo: Arc<CapacityRepository>, cache: Arc<dyn CacheStore>) -> Self {
        Self { repo, cache }
    }

    /// 物化产能窗口: 每个请求日期恰好一行,按日期升序
    ///
    /// 算法:
    /// 1. 日集合去重 + 排序
    /// 2. 查缓存 (键含窗口首末日),命中即返回
    /// 3. 未命中查台账;缺失日期合成零产能行;排序后写缓存并返回
    ///
    /// 只写缓存,不改存储
    pub async fn window(
        &self,
        org_id: &str,
        process: &str,
        machine_group: &str,
        days: &[NaiveDate],
    ) -> EngineResult<Vec<CapacityDay>> {
        if days.is_empty() {
            return Ok(Vec::new());
        }

        let unique: Vec<NaiveDate> = days.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let (Some(&start_day), Some(&end_day)) = (unique.first(), unique.last()) else {
            return Ok(Vec::new());
        };

        let cache_key = cache_keys::window_key(org_id, process, machine_group, start_day, end_day);
        if let Some(cached) = self.cache.get(&cache_key).await? {
            match serde_json::from_str::<Vec<CapacityDay>>(&cached) {
                Ok(rows) => return Ok(rows),
                Err(e) => {
                    tracing::warn!("产能窗口缓存解码失败,按未命中处理 key={}: {}", cache_key, e);
                }
            }
        }

        let mut rows = match self.repo.find_days(org_id, process, machine_group, &unique) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(
                    "读取产能窗口失败 org={}, process={}, machine_group={}: {}",
                    org_id,
                    process,
                    machine_group,
                    e
                );
                // 降级: 空结果即"无产能信号",该档位按无数据口径计算
                return Ok(Vec::new());
            }
        };

        let existing: HashSet<NaiveDate> = rows.iter().map(|r| r.day).collect();
        for day in &unique {
            if !existing.contains(day) {
                rows.push(CapacityDay::synthesized(
                    *day,
                    machine_group.to_string(),
                    process.to_string(),
                ));
            }
        }

        rows.sort_by_key(|r| r.day);

        let payload = serde_json::to_string(&rows)?;
        self.cache
            .set_with_ttl(&cache_key, payload, CAPACITY_WINDOW_TTL)
            .await?;

        Ok(rows)
    }
}
