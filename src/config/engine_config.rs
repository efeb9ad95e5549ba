// ==========================================
// 交期报价系统 - 引擎配置
// ==========================================
// 职责: 降级响应与默认时区的可配置项
// 存储: config_kv 表 (key-value + scope)
// 说明: 降级币种/天数原为硬编码,现改为配置项并保留原默认值,
//       默认取值待产品侧确认
// ==========================================

use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置键: 降级响应币种
const KEY_FALLBACK_CURRENCY: &str = "leadtime/fallback_currency";
/// 配置键: 降级响应标准档天数
const KEY_FALLBACK_STD_DAYS: &str = "leadtime/fallback_std_days";
/// 配置键: 组织无时区记录时的默认时区
const KEY_DEFAULT_TIMEZONE: &str = "leadtime/default_timezone";

// ==========================================
// EngineConfig - 引擎配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// 报价币种 (引擎级固定值,不随请求变化)
    pub fallback_currency: String,

    /// 降级响应的标准档交期 (工作日)
    pub fallback_std_days: u32,

    /// 默认时区 (组织未配置时区/降级响应使用)
    pub default_timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_currency: "INR".to_string(),
            fallback_std_days: 7,
            default_timezone: "UTC".to_string(),
        }
    }
}

impl EngineConfig {
    /// 从 config_kv 表加载配置 (scope_id='global'),缺失键取默认值
    pub fn load(conn: &Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        let defaults = Self::default();
        let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let fallback_currency = get_config_value(&conn_guard, KEY_FALLBACK_CURRENCY)?
            .unwrap_or(defaults.fallback_currency);

        let fallback_std_days = match get_config_value(&conn_guard, KEY_FALLBACK_STD_DAYS)? {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| format!("配置 {} 解析失败: {}", KEY_FALLBACK_STD_DAYS, e))?,
            None => defaults.fallback_std_days,
        };

        let default_timezone = get_config_value(&conn_guard, KEY_DEFAULT_TIMEZONE)?
            .unwrap_or(defaults.default_timezone);

        Ok(Self {
            fallback_currency,
            fallback_std_days,
            default_timezone,
        })
    }
}

/// 从 config_kv 表读取配置值 (scope_id='global')
fn get_config_value(conn: &Connection, key: &str) -> Result<Option<String>, Box<dyn Error>> {
    let result = conn
        .query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            rusqlite::params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_conn() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_leadtime_schema(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    #[test]
    fn test_load_defaults_when_table_empty() {
        let conn = setup_conn();
        let config = EngineConfig::load(&conn).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.fallback_currency, "INR");
        assert_eq!(config.fallback_std_days, 7);
        assert_eq!(config.default_timezone, "UTC");
    }

    #[test]
    fn test_load_overrides_from_config_kv() {
        let conn = setup_conn();
        {
            let c = conn.lock().unwrap();
            c.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES \
                 ('global', 'leadtime/fallback_currency', 'USD'), \
                 ('global', 'leadtime/fallback_std_days', '10')",
                [],
            )
            .unwrap();
        }

        let config = EngineConfig::load(&conn).unwrap();
        assert_eq!(config.fallback_currency, "USD");
        assert_eq!(config.fallback_std_days, 10);
        assert_eq!(config.default_timezone, "UTC");
    }

    #[test]
    fn test_load_rejects_malformed_day_count() {
        let conn = setup_conn();
        {
            let c = conn.lock().unwrap();
            c.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES \
                 ('global', 'leadtime/fallback_std_days', 'seven')",
                [],
            )
            .unwrap();
        }

        assert!(EngineConfig::load(&conn).is_err());
    }
}
