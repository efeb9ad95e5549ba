// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据写入等功能
// ==========================================

use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = leadtime_engine::db::open_sqlite_connection(&db_path)?;
    leadtime_engine::db::init_leadtime_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 写入组织行
#[allow(dead_code)]
pub fn seed_org(conn: &Connection, org_id: &str, timezone: &str, holidays: Option<&str>) {
    conn.execute(
        "INSERT OR REPLACE INTO org (org_id, org_name, timezone, holidays) \
         VALUES (?1, '测试组织', ?2, ?3)",
        rusqlite::params![org_id, timezone, holidays],
    )
    .unwrap();
}

/// 写入档位配置行
#[allow(dead_code)]
pub fn seed_profile(
    conn: &Connection,
    org_id: &str,
    process: &str,
    econ_days: u32,
    std_days: u32,
    express_days: u32,
    surge_multiplier: f64,
) {
    conn.execute(
        "INSERT OR REPLACE INTO leadtime_profile \
         (id, org_id, process, econ_days, std_days, express_days, surge_multiplier) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            format!("profile-{}-{}", org_id, process),
            org_id,
            process,
            econ_days,
            std_days,
            express_days,
            surge_multiplier
        ],
    )
    .unwrap();
}

/// 写入单日产能行
#[allow(dead_code)]
pub fn seed_capacity(
    conn: &Connection,
    org_id: &str,
    process: &str,
    machine_group: &str,
    day: chrono::NaiveDate,
    capacity_minutes: i64,
    booked_minutes: i64,
) {
    conn.execute(
        "INSERT OR REPLACE INTO capacity_ledger \
         (org_id, process, machine_group, day, capacity_minutes, booked_minutes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            org_id,
            process,
            machine_group,
            day,
            capacity_minutes,
            booked_minutes
        ],
    )
    .unwrap();
}

/// 写入人工覆盖行
#[allow(dead_code)]
pub fn seed_override(
    conn: &Connection,
    org_id: &str,
    process: &str,
    day: chrono::NaiveDate,
    class: &str,
    blocked: bool,
) {
    conn.execute(
        "INSERT OR REPLACE INTO leadtime_override \
         (id, org_id, process, day, class, blocked) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            format!("ov-{}-{}-{}", day, class, blocked),
            org_id,
            process,
            day,
            class,
            blocked
        ],
    )
    .unwrap();
}
