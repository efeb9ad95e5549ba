// ==========================================
// 交期报价系统 - 领域类型定义
// ==========================================
// 职责: 定义交期档位等基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 交期档位 (Lead Class)
// ==========================================
// 三个固定服务档位,各自有独立的工作日目标与定价策略
// 序列化格式: lowercase (与数据库/缓存一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadClass {
    Econ,     // 经济档
    Standard, // 标准档
    Express,  // 加急档
}

impl LeadClass {
    /// 全部档位，按评估顺序排列
    pub const ALL: [LeadClass; 3] = [LeadClass::Econ, LeadClass::Standard, LeadClass::Express];

    /// 数据库/缓存中使用的档位代码
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadClass::Econ => "econ",
            LeadClass::Standard => "standard",
            LeadClass::Express => "express",
        }
    }
}

impl fmt::Display for LeadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "econ" => Ok(LeadClass::Econ),
            "standard" => Ok(LeadClass::Standard),
            "express" => Ok(LeadClass::Express),
            other => Err(format!("无效的交期档位: {}", other)),
        }
    }
}
