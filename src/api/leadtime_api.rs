// ==========================================
// 交期报价系统 - LeadtimeApi 接口定义
// ==========================================
// 职责: 对上游定价编排器与运营控制台暴露的业务接口
// 说明: 传输层 (HTTP/RPC) 不在本引擎范围,接口保持传输无关
// ==========================================

use crate::api::dto::*;
use crate::api::error::ApiResult;
use crate::domain::capacity::CapacityLedgerEntry;
use crate::domain::overrides::LeadtimeOverride;
use crate::domain::profile::LeadtimeProfile;
use crate::domain::quote::LeadtimeResponse;
use async_trait::async_trait;

/// 交期业务接口
#[async_trait]
pub trait LeadtimeApi: Send + Sync {
    /// 计算交期选项 (报价热路径)
    ///
    /// 引擎内部错误收敛为降级响应;本方法只在输入校验失败时返回错误
    async fn compute_options(&self, request: ComputeLeadtimeRequest)
        -> ApiResult<LeadtimeResponse>;

    /// 批量写入产能台账 (运营工具),写后失效相关窗口缓存
    async fn bulk_upsert_capacity(
        &self,
        request: CapacityBulkUpsertRequest,
    ) -> ApiResult<CapacityBulkUpsertResponse>;

    /// 按日期区间读取产能台账 (运营工具,错误上抛)
    async fn get_capacity_window(
        &self,
        request: GetCapacityWindowRequest,
    ) -> ApiResult<Vec<CapacityLedgerEntry>>;

    /// 写入/更新人工覆盖,写后失效相关窗口缓存
    ///
    /// # 返回
    /// 覆盖行 ID
    async fn upsert_override(
        &self,
        request: UpsertOverrideRequest,
        actor_id: Option<String>,
    ) -> ApiResult<String>;

    /// 按日期区间列出人工覆盖
    async fn list_overrides(
        &self,
        request: ListOverridesRequest,
    ) -> ApiResult<Vec<LeadtimeOverride>>;

    /// 读取档位配置 (运营路径,直读存储)
    async fn get_profile(&self, request: GetProfileRequest) -> ApiResult<Option<LeadtimeProfile>>;

    /// 部分更新档位配置,更新后失效配置缓存
    ///
    /// # 返回
    /// - true: 行存在且已更新
    /// - false: 无变更字段,或行不存在
    async fn update_profile(
        &self,
        org_id: &str,
        process: &str,
        request: UpdateProfileRequest,
    ) -> ApiResult<bool>;
}
