// ==========================================
// 交期报价系统 - LeadtimeApi DTO 定义
// ==========================================
// 职责: 定义 LeadtimeApi 的请求和响应结构
// 红线: 校验发生在本边界,决策引擎内部不再做输入校验
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::capacity::CapacityUpsertEntry;
use crate::domain::overrides::OverrideUpsert;
use crate::domain::profile::ProfileUpdate;
use crate::domain::quote::PricingHookInput;
use crate::domain::types::LeadClass;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 校验非空字符串字段
fn require_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("字段 {} 不能为空", field)));
    }
    Ok(())
}

/// 校验 YYYY-MM-DD 日期字段
fn parse_day(field: &str, value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidInput(format!("字段 {} 不是合法日期 (YYYY-MM-DD): {}", field, e)))
}

// ==========================================
// 报价: compute_options
// ==========================================

/// 报价请求 (上游定价编排器)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeLeadtimeRequest {
    /// 组织 ID (必填)
    pub org_id: String,

    /// 工艺代码 (必填,如 cnc_milling)
    pub process: String,

    /// 机组代码 (必填,如 cnc-3axis)
    pub machine_group: String,

    /// 基础价格 (交期调整前,>=0)
    pub base_price: f64,

    /// 预估机时 (分钟,>=0)
    pub estimated_minutes: f64,

    /// 期望档位 (可选: econ | standard | express)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_class: Option<String>,
}

impl ComputeLeadtimeRequest {
    /// 边界校验并转换为引擎输入
    pub fn validate(self) -> ApiResult<PricingHookInput> {
        require_non_empty("org_id", &self.org_id)?;
        require_non_empty("process", &self.process)?;
        require_non_empty("machine_group", &self.machine_group)?;

        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "字段 base_price 必须是非负数: {}",
                self.base_price
            )));
        }
        if !self.estimated_minutes.is_finite() || self.estimated_minutes < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "字段 estimated_minutes 必须是非负数: {}",
                self.estimated_minutes
            )));
        }

        let desired_class = match &self.desired_class {
            Some(code) => Some(
                code.parse::<LeadClass>()
                    .map_err(ApiError::InvalidInput)?,
            ),
            None => None,
        };

        Ok(PricingHookInput {
            org_id: self.org_id,
            process: self.process,
            machine_group: self.machine_group,
            base_price: self.base_price,
            estimated_minutes: self.estimated_minutes,
            desired_class,
        })
    }
}

// ==========================================
// 产能: bulk_upsert_capacity / get_capacity_window
// ==========================================

/// 单条产能写入 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityEntryDto {
    /// 组织 ID
    pub org_id: String,

    /// 工艺代码
    pub process: String,

    /// 机组代码
    pub machine_group: String,

    /// 日期 (YYYY-MM-DD)
    pub day: String,

    /// 可用产能 (分钟,>=0)
    pub capacity_minutes: i64,

    /// 已预订分钟 (可选;缺省保留台账现值)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_minutes: Option<i64>,

    /// 备注 (可选;缺省保留台账现值)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CapacityEntryDto {
    fn validate(self) -> ApiResult<CapacityUpsertEntry> {
        require_non_empty("org_id", &self.org_id)?;
        require_non_empty("process", &self.process)?;
        require_non_empty("machine_group", &self.machine_group)?;
        let day = parse_day("day", &self.day)?;

        if self.capacity_minutes < 0 {
            return Err(ApiError::InvalidInput(format!(
                "字段 capacity_minutes 必须是非负数: {}",
                self.capacity_minutes
            )));
        }
        if let Some(booked) = self.booked_minutes {
            if booked < 0 {
                return Err(ApiError::InvalidInput(format!(
                    "字段 booked_minutes 必须是非负数: {}",
                    booked
                )));
            }
        }

        Ok(CapacityUpsertEntry {
            org_id: self.org_id,
            process: self.process,
            machine_group: self.machine_group,
            day,
            capacity_minutes: self.capacity_minutes,
            booked_minutes: self.booked_minutes,
            notes: self.notes,
        })
    }
}

/// 批量产能写入请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityBulkUpsertRequest {
    /// 写入条目列表
    pub entries: Vec<CapacityEntryDto>,
}

impl CapacityBulkUpsertRequest {
    /// 边界校验并转换为领域写入条目
    pub fn validate(self) -> ApiResult<Vec<CapacityUpsertEntry>> {
        self.entries
            .into_iter()
            .map(CapacityEntryDto::validate)
            .collect()
    }
}

/// 批量产能写入响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityBulkUpsertResponse {
    /// 写入行数
    pub upserted: usize,

    /// 涉及的组织 ID (升序去重)
    pub org_ids: Vec<String>,
}

/// 产能区间查询请求 (运营工具)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCapacityWindowRequest {
    pub org_id: String,
    pub process: String,
    pub machine_group: String,

    /// 起始日期 (YYYY-MM-DD)
    pub from: String,

    /// 结束日期 (YYYY-MM-DD)
    pub to: String,
}

impl GetCapacityWindowRequest {
    /// 边界校验;返回 (from, to)
    pub fn validate(&self) -> ApiResult<(NaiveDate, NaiveDate)> {
        require_non_empty("org_id", &self.org_id)?;
        require_non_empty("process", &self.process)?;
        require_non_empty("machine_group", &self.machine_group)?;

        let from = parse_day("from", &self.from)?;
        let to = parse_day("to", &self.to)?;
        if from > to {
            return Err(ApiError::InvalidInput(format!(
                "日期区间非法: from={} 晚于 to={}",
                from, to
            )));
        }
        Ok((from, to))
    }
}

// ==========================================
// 覆盖: upsert_override / list_overrides
// ==========================================

/// 覆盖写入请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertOverrideRequest {
    pub org_id: String,
    pub process: String,

    /// 覆盖日期 (YYYY-MM-DD)
    pub day: String,

    /// 档位代码 (econ | standard | express)
    pub class: String,

    /// true=封锁该档, false=人工放行
    pub blocked: bool,

    /// 覆盖原因 (可选)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl UpsertOverrideRequest {
    /// 边界校验并转换为领域写入条目
    pub fn validate(self, actor_id: Option<String>) -> ApiResult<OverrideUpsert> {
        require_non_empty("org_id", &self.org_id)?;
        require_non_empty("process", &self.process)?;
        let day = parse_day("day", &self.day)?;
        let class = self
            .class
            .parse::<LeadClass>()
            .map_err(ApiError::InvalidInput)?;

        Ok(OverrideUpsert {
            org_id: self.org_id,
            process: self.process,
            day,
            class,
            blocked: self.blocked,
            reason: self.reason,
            created_by: actor_id,
        })
    }
}

/// 覆盖区间查询请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOverridesRequest {
    pub org_id: String,
    pub process: String,
    pub from: String,
    pub to: String,
}

impl ListOverridesRequest {
    /// 边界校验;返回 (from, to)
    pub fn validate(&self) -> ApiResult<(NaiveDate, NaiveDate)> {
        require_non_empty("org_id", &self.org_id)?;
        require_non_empty("process", &self.process)?;

        let from = parse_day("from", &self.from)?;
        let to = parse_day("to", &self.to)?;
        if from > to {
            return Err(ApiError::InvalidInput(format!(
                "日期区间非法: from={} 晚于 to={}",
                from, to
            )));
        }
        Ok((from, to))
    }
}

// ==========================================
// 档位配置: get_profile / update_profile
// ==========================================

/// 档位配置查询请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProfileRequest {
    pub org_id: String,
    pub process: String,
}

impl GetProfileRequest {
    pub fn validate(&self) -> ApiResult<()> {
        require_non_empty("org_id", &self.org_id)?;
        require_non_empty("process", &self.process)
    }
}

/// 档位配置部分更新请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// 经济档天数 (>=1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub econ_days: Option<u32>,

    /// 标准档天数 (>=1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_days: Option<u32>,

    /// 加急档天数 (>=1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub express_days: Option<u32>,

    /// 加价系数 (>=1,如 1.15 = 加价 15%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surge_multiplier: Option<f64>,
}

impl UpdateProfileRequest {
    /// 边界校验并转换为领域更新条目
    pub fn validate(self) -> ApiResult<ProfileUpdate> {
        for (field, value) in [
            ("econ_days", self.econ_days),
            ("std_days", self.std_days),
            ("express_days", self.express_days),
        ] {
            if let Some(days) = value {
                if days < 1 {
                    return Err(ApiError::InvalidInput(format!(
                        "字段 {} 必须 >= 1: {}",
                        field, days
                    )));
                }
            }
        }
        if let Some(multiplier) = self.surge_multiplier {
            if !multiplier.is_finite() || multiplier < 1.0 {
                return Err(ApiError::InvalidInput(format!(
                    "字段 surge_multiplier 必须 >= 1: {}",
                    multiplier
                )));
            }
        }

        Ok(ProfileUpdate {
            econ_days: self.econ_days,
            std_days: self.std_days,
            express_days: self.express_days,
            surge_multiplier: self.surge_multiplier,
        })
    }
}
