// ==========================================
// 交期报价系统 - 人工交期覆盖领域模型
// ==========================================
// 用途: 运营人员按 (组织, 工艺, 日, 档位) 强制封锁或放行某档交期
// 语义: blocked=true 一票否决该档; blocked=false 是策略例外,
//       可解救因高利用率本应下架的档位
// ==========================================

use crate::domain::types::LeadClass;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// LeadtimeOverride - 覆盖行
// ==========================================
// 自然键 (org_id, process, day, class) 上 upsert,后写覆盖,
// 本引擎不保留历史
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadtimeOverride {
    /// 行 ID
    pub id: String,

    /// 组织 ID
    pub org_id: String,

    /// 工艺代码
    pub process: String,

    /// 覆盖日期
    pub day: NaiveDate,

    /// 交期档位
    pub class: LeadClass,

    /// true=封锁该档, false=人工放行
    pub blocked: bool,

    /// 覆盖原因 (可选)
    pub reason: Option<String>,

    /// 操作人 (可选)
    pub created_by: Option<String>,

    /// 写入时间 (ISO 8601)
    pub created_at: String,
}

// ==========================================
// OverrideUpsert - 覆盖写入条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideUpsert {
    pub org_id: String,
    pub process: String,
    pub day: NaiveDate,
    pub class: LeadClass,
    pub blocked: bool,
    pub reason: Option<String>,
    pub created_by: Option<String>,
}
