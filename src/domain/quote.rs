// ==========================================
// 交期报价系统 - 报价输入/输出领域模型
// ==========================================
// 用途: 定价钩子输入与交期选项输出
// 生命周期: 每次报价请求构造一次,只读,不落库
// ==========================================

use crate::domain::types::LeadClass;
use serde::{Deserialize, Serialize};

// ==========================================
// PricingHookInput - 定价钩子输入
// ==========================================
// 上游定价编排器提供,本引擎只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingHookInput {
    /// 组织 ID
    pub org_id: String,

    /// 工艺代码
    pub process: String,

    /// 机组代码
    pub machine_group: String,

    /// 基础价格 (交期调整前,>=0)
    pub base_price: f64,

    /// 预估机时 (分钟,>=0)
    pub estimated_minutes: f64,

    /// 期望档位 (可选,预留给上游筛选)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_class: Option<LeadClass>,
}

// ==========================================
// LeadtimeOption - 单档交期选项
// ==========================================
// 不可变值对象,构造后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadtimeOption {
    /// 交期档位
    pub class: LeadClass,

    /// 交期 (工作日)
    pub days: u32,

    /// 承诺发货日期 (YYYY-MM-DD,组织时区)
    pub ship_date: String,

    /// 价格调整额 (2 位小数,可为负)
    pub price_delta: f64,

    /// 是否应用加价系数
    pub surge_applied: bool,

    /// 窗口 P95 利用率 (3 位小数)
    pub utilization_window: f64,

    /// 可解释性注记 (固定顺序)
    pub reasons: Vec<String>,
}

// ==========================================
// LeadtimeResponse - 报价响应
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadtimeResponse {
    /// 存活的交期选项,按天数升序
    pub options: Vec<LeadtimeOption>,

    /// 基础价格 (原样回传)
    pub base_price: f64,

    /// 币种代码 (引擎级配置)
    pub currency: String,
}
