// ==========================================
// 交期报价系统 - 缓存键构建
// ==========================================
// 职责: 集中定义缓存键格式,写入与失效两侧共用一个口径
// ==========================================

use chrono::NaiveDate;

/// 产能窗口缓存键
pub(crate) fn window_key(
    org_id: &str,
    process: &str,
    machine_group: &str,
    start_day: NaiveDate,
    end_day: NaiveDate,
) -> String {
    format!(
        "leadtime:window:{}:{}:{}:{}:{}",
        org_id, process, machine_group, start_day, end_day
    )
}

/// 产能窗口失效模式 (机组可选: 缺省时覆盖该组织×工艺的全部机组)
pub(crate) fn window_pattern(org_id: &str, process: &str, machine_group: Option<&str>) -> String {
    match machine_group {
        Some(group) => format!("leadtime:window:{}:{}:{}:*", org_id, process, group),
        None => format!("leadtime:window:{}:{}:*", org_id, process),
    }
}

/// 档位配置缓存键
pub(crate) fn profile_key(org_id: &str, process: &str) -> String {
    format!("leadtime:profile:{}:{}", org_id, process)
}

/// 组织时区缓存键
pub(crate) fn timezone_key(org_id: &str) -> String {
    format!("org:timezone:{}", org_id)
}

/// 组织节假日缓存键
pub(crate) fn holidays_key(org_id: &str) -> String {
    format!("org:holidays:{}", org_id)
}
