// ==========================================
// 交期报价系统 - LeadtimeApi 实现
// ==========================================
// 职责: 组合编排器与仓储,落实"先写存储,后失效缓存"的顺序
// 说明: 缓存失效相对写事务是 fire-and-forget,
//       失效失败只记日志 (短 TTL 兜底有界陈旧)
// ==========================================

use crate::api::dto::*;
use crate::api::error::ApiResult;
use crate::api::leadtime_api::LeadtimeApi;
use crate::domain::capacity::CapacityLedgerEntry;
use crate::domain::overrides::LeadtimeOverride;
use crate::domain::profile::LeadtimeProfile;
use crate::domain::quote::LeadtimeResponse;
use crate::engine::LeadtimeOrchestrator;
use crate::repository::{CapacityRepository, OverrideRepository, ProfileRepository};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

/// LeadtimeApi 实现
pub struct LeadtimeApiImpl {
    /// 交期编排器
    orchestrator: Arc<LeadtimeOrchestrator>,
    /// 产能台账仓储
    capacity_repo: Arc<CapacityRepository>,
    /// 覆盖仓储
    override_repo: Arc<OverrideRepository>,
    /// 档位配置仓储
    profile_repo: Arc<ProfileRepository>,
}

impl LeadtimeApiImpl {
    /// 创建新的 LeadtimeApiImpl 实例
    pub fn new(
        orchestrator: Arc<LeadtimeOrchestrator>,
        capacity_repo: Arc<CapacityRepository>,
        override_repo: Arc<OverrideRepository>,
        profile_repo: Arc<ProfileRepository>,
    ) -> Self {
        Self {
            orchestrator,
            capacity_repo,
            override_repo,
            profile_repo,
        }
    }
}

#[async_trait]
impl LeadtimeApi for LeadtimeApiImpl {
    async fn compute_options(
        &self,
        request: ComputeLeadtimeRequest,
    ) -> ApiResult<LeadtimeResponse> {
        // 校验只在边界发生;引擎内部错误已收敛为降级响应
        let input = request.validate()?;
        Ok(self.orchestrator.compute_options(&input).await)
    }

    async fn bulk_upsert_capacity(
        &self,
        request: CapacityBulkUpsertRequest,
    ) -> ApiResult<CapacityBulkUpsertResponse> {
        let entries = request.validate()?;
        if entries.is_empty() {
            return Ok(CapacityBulkUpsertResponse {
                upserted: 0,
                org_ids: Vec::new(),
            });
        }

        // 失效目标按 (组织, 工艺, 机组) 去重
        let mut org_ids: BTreeSet<String> = BTreeSet::new();
        let mut cache_targets: BTreeSet<(String, String, String)> = BTreeSet::new();
        for entry in &entries {
            org_ids.insert(entry.org_id.clone());
            cache_targets.insert((
                entry.org_id.clone(),
                entry.process.clone(),
                entry.machine_group.clone(),
            ));
        }

        let upserted = self.capacity_repo.bulk_upsert(&entries)?;

        for (org_id, process, machine_group) in cache_targets {
            self.orchestrator
                .invalidate_capacity_cache(&org_id, &process, Some(&machine_group))
                .await;
        }

        Ok(CapacityBulkUpsertResponse {
            upserted,
            org_ids: org_ids.into_iter().collect(),
        })
    }

    async fn get_capacity_window(
        &self,
        request: GetCapacityWindowRequest,
    ) -> ApiResult<Vec<CapacityLedgerEntry>> {
        let (from, to) = request.validate()?;

        // 运营区间读取路径: 存储错误上抛,不降级
        let rows = self.capacity_repo.find_range(
            &request.org_id,
            &request.process,
            &request.machine_group,
            from,
            to,
        )?;
        Ok(rows)
    }

    async fn upsert_override(
        &self,
        request: UpsertOverrideRequest,
        actor_id: Option<String>,
    ) -> ApiResult<String> {
        let entry = request.validate(actor_id)?;
        let id = self.override_repo.upsert(&entry)?;

        // 覆盖影响该 (组织, 工艺) 下全部机组的窗口判定
        self.orchestrator
            .invalidate_capacity_cache(&entry.org_id, &entry.process, None)
            .await;

        Ok(id)
    }

    async fn list_overrides(
        &self,
        request: ListOverridesRequest,
    ) -> ApiResult<Vec<LeadtimeOverride>> {
        let (from, to) = request.validate()?;
        let rows = self
            .override_repo
            .list_range(&request.org_id, &request.process, from, to)?;
        Ok(rows)
    }

    async fn get_profile(&self, request: GetProfileRequest) -> ApiResult<Option<LeadtimeProfile>> {
        request.validate()?;
        let profile = self.profile_repo.find(&request.org_id, &request.process)?;
        Ok(profile)
    }

    async fn update_profile(
        &self,
        org_id: &str,
        process: &str,
        request: UpdateProfileRequest,
    ) -> ApiResult<bool> {
        let update = request.validate()?;
        let updated = self.profile_repo.update_partial(org_id, process, &update)?;

        if updated {
            self.orchestrator
                .invalidate_profile_cache(org_id, process)
                .await;
        }

        Ok(updated)
    }
}
