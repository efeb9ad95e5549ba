// ==========================================
// 交期报价系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 集中 schema 初始化，保证库/测试/演示入口建表口径一致
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化交期引擎 schema（幂等）
///
/// 表清单：
/// - org               组织（时区 + 节假日列表）
/// - leadtime_profile  交期档位配置（每组织 × 工艺）
/// - capacity_ledger   产能台账（每组织 × 工艺 × 机组 × 日）
/// - leadtime_override 人工交期覆盖（每组织 × 工艺 × 日 × 档位）
/// - config_kv         引擎配置（key-value + scope）
pub fn init_leadtime_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS org (
            org_id      TEXT PRIMARY KEY,
            org_name    TEXT NOT NULL DEFAULT '',
            timezone    TEXT NOT NULL DEFAULT 'UTC',
            holidays    TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS leadtime_profile (
            id               TEXT NOT NULL,
            org_id           TEXT NOT NULL,
            process          TEXT NOT NULL,
            econ_days        INTEGER NOT NULL,
            std_days         INTEGER NOT NULL,
            express_days     INTEGER NOT NULL,
            surge_multiplier REAL NOT NULL DEFAULT 1.0,
            created_at       TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at       TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (org_id, process)
        );

        CREATE TABLE IF NOT EXISTS capacity_ledger (
            org_id           TEXT NOT NULL,
            process          TEXT NOT NULL,
            machine_group    TEXT NOT NULL,
            day              TEXT NOT NULL,
            capacity_minutes INTEGER NOT NULL DEFAULT 0,
            booked_minutes   INTEGER NOT NULL DEFAULT 0,
            notes            TEXT,
            updated_at       TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (org_id, process, machine_group, day)
        );

        CREATE TABLE IF NOT EXISTS leadtime_override (
            id         TEXT NOT NULL,
            org_id     TEXT NOT NULL,
            process    TEXT NOT NULL,
            day        TEXT NOT NULL,
            class      TEXT NOT NULL,
            blocked    INTEGER NOT NULL,
            reason     TEXT,
            created_by TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (org_id, process, day, class)
        );

        CREATE INDEX IF NOT EXISTS idx_leadtime_override_class_day
            ON leadtime_override (org_id, process, class, day);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id   TEXT NOT NULL DEFAULT 'global',
            key        TEXT NOT NULL,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        // 连续两次初始化不应报错
        init_leadtime_schema(&conn).unwrap();
        init_leadtime_schema(&conn).unwrap();

        // 验证核心表存在
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('org', 'leadtime_profile', 'capacity_ledger', 'leadtime_override', 'config_kv')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 5);
    }
}
