// ==========================================
// 交期报价系统 - 交期档位配置领域模型
// ==========================================
// 用途: 每 (组织, 工艺) 一条,定义三档交期天数与加价系数
// 生命周期: 运营人员维护,读多写少,带缓存
// ==========================================

use crate::domain::types::LeadClass;
use serde::{Deserialize, Serialize};

// ==========================================
// LeadtimeProfile - 交期档位配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadtimeProfile {
    /// 行 ID
    pub id: String,

    /// 组织 ID
    pub org_id: String,

    /// 工艺代码 (如 cnc_milling)
    pub process: String,

    /// 经济档交期 (工作日,>=1)
    pub econ_days: u32,

    /// 标准档交期 (工作日,>=1)
    pub std_days: u32,

    /// 加急档交期 (工作日,>=1)
    pub express_days: u32,

    /// 加价系数 (>=1,如 1.2 = 加价 20%)
    pub surge_multiplier: f64,

    /// 创建时间 (ISO 8601)
    pub created_at: String,

    /// 更新时间 (ISO 8601)
    pub updated_at: String,
}

impl LeadtimeProfile {
    /// 指定档位的交期天数
    pub fn class_days(&self, cls: LeadClass) -> u32 {
        match cls {
            LeadClass::Econ => self.econ_days,
            LeadClass::Standard => self.std_days,
            LeadClass::Express => self.express_days,
        }
    }
}

// ==========================================
// ProfileUpdate - 档位配置部分更新
// ==========================================
// 全部字段可选; 全空的更新视为无操作
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub econ_days: Option<u32>,
    pub std_days: Option<u32>,
    pub express_days: Option<u32>,
    pub surge_multiplier: Option<f64>,
}

impl ProfileUpdate {
    /// 是否不包含任何变更
    pub fn is_empty(&self) -> bool {
        self.econ_days.is_none()
            && self.std_days.is_none()
            && self.express_days.is_none()
            && self.surge_multiplier.is_none()
    }
}
