// ==========================================
// 交期报价系统 - 产能台账领域模型
// ==========================================
// 用途: 每 (组织, 工艺, 机组, 日) 一条,记录可用/已预订机时
// 红线: 利用率恒在 [0,1] 区间,含合成行
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityDay - 单日产能
// ==========================================
// 台账中缺失的日期不是错误: 窗口物化时合成为
// 零产能/零预订/零利用率的占位行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityDay {
    /// 日期
    pub day: NaiveDate,

    /// 可用产能 (分钟,>=0)
    pub capacity_minutes: i64,

    /// 已预订 (分钟,>=0,允许超过产能)
    pub booked_minutes: i64,

    /// 利用率 (0.0-1.0)
    pub utilization: f64,

    /// 机组代码
    pub machine_group: String,

    /// 工艺代码
    pub process: String,
}

impl CapacityDay {
    /// 从台账行构造,利用率按公式推导
    pub fn from_minutes(
        day: NaiveDate,
        capacity_minutes: i64,
        booked_minutes: i64,
        machine_group: String,
        process: String,
    ) -> Self {
        Self {
            day,
            capacity_minutes,
            booked_minutes,
            utilization: compute_utilization(capacity_minutes, booked_minutes),
            machine_group,
            process,
        }
    }

    /// 为台账缺失的日期合成占位行
    ///
    /// 注意: 合成行的利用率固定为 0,不走推导公式
    /// (推导公式对零产能给出 1,语义是"满负荷";缺行语义是"无信号")
    pub fn synthesized(day: NaiveDate, machine_group: String, process: String) -> Self {
        Self {
            day,
            capacity_minutes: 0,
            booked_minutes: 0,
            utilization: 0.0,
            machine_group,
            process,
        }
    }
}

/// 利用率推导
///
/// 规则:
/// - capacity_minutes <= 0 视为满负荷(1.0),永不除零
/// - 否则 booked/capacity,上限截断到 1.0
pub fn compute_utilization(capacity_minutes: i64, booked_minutes: i64) -> f64 {
    if capacity_minutes <= 0 {
        return 1.0;
    }

    (booked_minutes as f64 / capacity_minutes as f64).min(1.0)
}

// ==========================================
// CapacityLedgerEntry - 运营侧区间读取行
// ==========================================
// 与 CapacityDay 相同字段,额外携带备注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityLedgerEntry {
    pub day: NaiveDate,
    pub capacity_minutes: i64,
    pub booked_minutes: i64,
    pub utilization: f64,
    pub machine_group: String,
    pub process: String,
    pub notes: Option<String>,
}

// ==========================================
// CapacityUpsertEntry - 批量写入条目
// ==========================================
// booked_minutes/notes 缺省时表示"保留台账现值"(部分更新)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityUpsertEntry {
    pub org_id: String,
    pub process: String,
    pub machine_group: String,
    pub day: NaiveDate,
    pub capacity_minutes: i64,
    pub booked_minutes: Option<i64>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_utilization_normal() {
        assert_eq!(compute_utilization(480, 240), 0.5);
        assert_eq!(compute_utilization(480, 0), 0.0);
    }

    #[test]
    fn test_utilization_overbooked_clamped() {
        // 超订截断到 1.0
        assert_eq!(compute_utilization(480, 960), 1.0);
    }

    #[test]
    fn test_utilization_zero_capacity_is_full() {
        assert_eq!(compute_utilization(0, 0), 1.0);
        assert_eq!(compute_utilization(0, 100), 1.0);
        assert_eq!(compute_utilization(-10, 0), 1.0);
    }

    #[test]
    fn test_synthesized_day_has_zero_utilization() {
        let synthesized = CapacityDay::synthesized(
            day("2026-03-02"),
            "cnc-3axis".to_string(),
            "cnc_milling".to_string(),
        );
        assert_eq!(synthesized.capacity_minutes, 0);
        assert_eq!(synthesized.booked_minutes, 0);
        assert_eq!(synthesized.utilization, 0.0);
    }

    #[test]
    fn test_from_minutes_derives_utilization() {
        let cd = CapacityDay::from_minutes(
            day("2026-03-02"),
            100,
            97,
            "cnc-3axis".to_string(),
            "cnc_milling".to_string(),
        );
        assert_eq!(cd.utilization, 0.97);
    }
}
