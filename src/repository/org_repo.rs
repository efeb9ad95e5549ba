// ==========================================
// 交期报价系统 - 组织仓储
// ==========================================
// 职责: org 表数据访问 (时区 + 节假日列表)
// 口径: 节假日以 JSON 数组存储在 holidays 列 (每组织一份列表)
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 组织仓储
pub struct OrgRepository {
    /// 数据库连接
    conn: Arc<Mutex<Connection>>,
}

impl OrgRepository {
    /// 创建新的组织仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取组织时区;组织不存在返回 None
    pub fn timezone(&self, org_id: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let timezone = conn
            .query_row(
                "SELECT timezone FROM org WHERE org_id = ?1",
                rusqlite::params![org_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(timezone)
    }

    /// 读取组织节假日列表 (升序)
    ///
    /// 组织不存在或 holidays 列为空时返回空列表
    pub fn holidays(&self, org_id: &str) -> RepositoryResult<Vec<NaiveDate>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let raw: Option<Option<String>> = conn
            .query_row(
                "SELECT holidays FROM org WHERE org_id = ?1",
                rusqlite::params![org_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(Some(json)) = raw else {
            return Ok(Vec::new());
        };

        let codes: Vec<String> =
            serde_json::from_str(&json).map_err(|e| RepositoryError::DataFormatError {
                column: "org.holidays".to_string(),
                message: e.to_string(),
            })?;

        let mut days = Vec::with_capacity(codes.len());
        for code in codes {
            let day = NaiveDate::parse_from_str(&code, "%Y-%m-%d").map_err(|e| {
                RepositoryError::DataFormatError {
                    column: "org.holidays".to_string(),
                    message: format!("{}: {}", code, e),
                }
            })?;
            days.push(day);
        }
        days.sort();

        Ok(days)
    }
}
