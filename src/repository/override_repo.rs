// ==========================================
// 交期报价系统 - 人工交期覆盖仓储
// ==========================================
// 职责: leadtime_override 表数据访问
// 口径: 日集合上的存在性判定 (封锁/放行) 供报价热路径,
//       upsert 与区间列表供运营工具
// ==========================================

use crate::domain::overrides::{LeadtimeOverride, OverrideUpsert};
use crate::domain::types::LeadClass;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_utils::build_in_clause;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 人工交期覆盖仓储
pub struct OverrideRepository {
    /// 数据库连接
    conn: Arc<Mutex<Connection>>,
}

impl OverrideRepository {
    /// 创建新的覆盖仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 日集合内是否存在 blocked=true 的覆盖行
    pub fn has_blocked(
        &self,
        org_id: &str,
        process: &str,
        class: LeadClass,
        days: &[NaiveDate],
    ) -> RepositoryResult<bool> {
        self.exists_with_blocked(org_id, process, class, days, true)
    }

    /// 日集合内是否存在 blocked=false 的覆盖行 (人工放行)
    pub fn has_unblocked(
        &self,
        org_id: &str,
        process: &str,
        class: LeadClass,
        days: &[NaiveDate],
    ) -> RepositoryResult<bool> {
        self.exists_with_blocked(org_id, process, class, days, false)
    }

    fn exists_with_blocked(
        &self,
        org_id: &str,
        process: &str,
        class: LeadClass,
        days: &[NaiveDate],
        blocked: bool,
    ) -> RepositoryResult<bool> {
        if days.is_empty() {
            return Ok(false);
        }

        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let sql = format!(
            "SELECT 1 FROM leadtime_override \
             WHERE org_id = ? AND process = ? AND class = ? AND blocked = ? AND {} \
             LIMIT 1",
            build_in_clause("day", days.len())
        );

        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(org_id.to_string()),
            Box::new(process.to_string()),
            Box::new(class.as_str().to_string()),
            Box::new(blocked),
        ];
        for day in days {
            sql_params.push(Box::new(*day));
        }

        let mut stmt = conn.prepare(&sql)?;
        let found = stmt
            .query_row(rusqlite::params_from_iter(sql_params), |_row| Ok(true))
            .optional()?;

        Ok(found.unwrap_or(false))
    }

    /// 按自然键 (org_id, process, day, class) upsert,后写覆盖
    ///
    /// # 返回
    /// 行 ID (新建行生成 UUID,既有行保留原 ID)
    pub fn upsert(&self, entry: &OverrideUpsert) -> RepositoryResult<String> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO leadtime_override \
             (id, org_id, process, day, class, blocked, reason, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now')) \
             ON CONFLICT(org_id, process, day, class) DO UPDATE SET \
                blocked = excluded.blocked, \
                reason = excluded.reason, \
                created_by = excluded.created_by, \
                created_at = excluded.created_at",
            params![
                Uuid::new_v4().to_string(),
                entry.org_id,
                entry.process,
                entry.day,
                entry.class.as_str(),
                entry.blocked,
                entry.reason,
                entry.created_by,
            ],
        )?;

        let id: String = conn.query_row(
            "SELECT id FROM leadtime_override \
             WHERE org_id = ?1 AND process = ?2 AND day = ?3 AND class = ?4",
            params![entry.org_id, entry.process, entry.day, entry.class.as_str()],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    /// 按日期区间列出覆盖行,按 (日期, 档位) 升序
    pub fn list_range(
        &self,
        org_id: &str,
        process: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<LeadtimeOverride>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT id, org_id, process, day, class, blocked, reason, created_by, created_at \
             FROM leadtime_override \
             WHERE org_id = ?1 AND process = ?2 AND day >= ?3 AND day <= ?4 \
             ORDER BY day ASC, class ASC",
        )?;

        let rows = stmt.query_map(params![org_id, process, from, to], |row| {
            let class_code: String = row.get(4)?;
            let class = LeadClass::from_str(&class_code).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
            })?;

            Ok(LeadtimeOverride {
                id: row.get(0)?,
                org_id: row.get(1)?,
                process: row.get(2)?,
                day: row.get(3)?,
                class,
                blocked: row.get(5)?,
                reason: row.get(6)?,
                created_by: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
