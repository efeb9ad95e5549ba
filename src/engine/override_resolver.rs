// ==========================================
// 交期报价系统 - 人工覆盖解析器
// ==========================================
// 职责: 回答窗口日集合上的两个是非题:
//       "该档位是否被任一日封锁" / "该档位是否被任一日人工放行"
// 口径: 两者可同时为真 (不同日);封锁优先由决策引擎的检查顺序保证
// ==========================================

use crate::domain::types::LeadClass;
use crate::engine::error::EngineResult;
use crate::repository::OverrideRepository;
use chrono::NaiveDate;
use std::sync::Arc;

/// 人工覆盖解析器
pub struct OverrideResolver {
    /// 覆盖仓储
    repo: Arc<OverrideRepository>,
}

impl OverrideResolver {
    /// 创建新的覆盖解析器
    pub fn new(repo: Arc<OverrideRepository>) -> Self {
        Self { repo }
    }

    /// 窗口内任一日存在 blocked=true 覆盖
    pub fn is_blocked(
        &self,
        org_id: &str,
        process: &str,
        class: LeadClass,
        days: &[NaiveDate],
    ) -> EngineResult<bool> {
        self.repo
            .has_blocked(org_id, process, class, days)
            .map_err(Into::into)
    }

    /// 窗口内任一日存在 blocked=false 覆盖 (人工放行)
    pub fn is_manually_unblocked(
        &self,
        org_id: &str,
        process: &str,
        class: LeadClass,
        days: &[NaiveDate],
    ) -> EngineResult<bool> {
        self.repo
            .has_unblocked(org_id, process, class, days)
            .map_err(Into::into)
    }
}
