// ==========================================
// 交期报价系统 - 产能台账仓储
// ==========================================
// 职责: capacity_ledger 表数据访问
// 口径: 日集合读取供报价热路径,区间读取供运营工具,
//       批量写入带部分更新合并 (缺省字段保留现值)
// ==========================================

use crate::domain::capacity::{CapacityDay, CapacityLedgerEntry, CapacityUpsertEntry};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_utils::build_in_clause;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 产能台账仓储
pub struct CapacityRepository {
    /// 数据库连接
    conn: Arc<Mutex<Connection>>,
}

impl CapacityRepository {
    /// 创建新的产能台账仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 按日集合读取已存在的台账行,按日期升序
    ///
    /// 只返回有行的日期;缺失日期的合成由上层 (Capacity Accessor) 负责
    pub fn find_days(
        &self,
        org_id: &str,
        process: &str,
        machine_group: &str,
        days: &[NaiveDate],
    ) -> RepositoryResult<Vec<CapacityDay>> {
        if days.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let sql = format!(
            "SELECT day, capacity_minutes, booked_minutes, machine_group, process \
             FROM capacity_ledger \
             WHERE org_id = ? AND process = ? AND machine_group = ? AND {} \
             ORDER BY day ASC",
            build_in_clause("day", days.len())
        );

        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(org_id.to_string()),
            Box::new(process.to_string()),
            Box::new(machine_group.to_string()),
        ];
        for day in days {
            sql_params.push(Box::new(*day));
        }

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(sql_params), |row| {
            Ok(CapacityDay::from_minutes(
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 按日期区间读取台账行 (运营工具路径),含备注,按日期升序
    pub fn find_range(
        &self,
        org_id: &str,
        process: &str,
        machine_group: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<CapacityLedgerEntry>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT day, capacity_minutes, booked_minutes, machine_group, process, notes \
             FROM capacity_ledger \
             WHERE org_id = ?1 AND process = ?2 AND machine_group = ?3 \
               AND day >= ?4 AND day <= ?5 \
             ORDER BY day ASC",
        )?;

        let rows = stmt.query_map(
            params![org_id, process, machine_group, from, to],
            |row| {
                let capacity_minutes: i64 = row.get(1)?;
                let booked_minutes: i64 = row.get(2)?;
                Ok(CapacityLedgerEntry {
                    day: row.get(0)?,
                    capacity_minutes,
                    booked_minutes,
                    utilization: crate::domain::capacity::compute_utilization(
                        capacity_minutes,
                        booked_minutes,
                    ),
                    machine_group: row.get(3)?,
                    process: row.get(4)?,
                    notes: row.get(5)?,
                })
            },
        )?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 批量 upsert 产能台账 (单事务)
    ///
    /// 合并规则: 条目缺省 booked_minutes/notes 时保留台账现值,
    /// 无现值时分别取 0 / NULL
    ///
    /// # 返回
    /// 写入的行数
    pub fn bulk_upsert(&self, entries: &[CapacityUpsertEntry]) -> RepositoryResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut upserted = 0;
        for entry in entries {
            // 部分更新: 先读现值再合并
            let existing: Option<(i64, Option<String>)> = tx
                .query_row(
                    "SELECT booked_minutes, notes FROM capacity_ledger \
                     WHERE org_id = ?1 AND process = ?2 AND machine_group = ?3 AND day = ?4",
                    params![entry.org_id, entry.process, entry.machine_group, entry.day],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let booked_minutes = entry
                .booked_minutes
                .unwrap_or_else(|| existing.as_ref().map(|(b, _)| *b).unwrap_or(0));
            let notes = match &entry.notes {
                Some(n) => Some(n.clone()),
                None => existing.and_then(|(_, n)| n),
            };

            tx.execute(
                "INSERT INTO capacity_ledger \
                 (org_id, process, machine_group, day, capacity_minutes, booked_minutes, notes, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now')) \
                 ON CONFLICT(org_id, process, machine_group, day) DO UPDATE SET \
                    capacity_minutes = excluded.capacity_minutes, \
                    booked_minutes = excluded.booked_minutes, \
                    notes = excluded.notes, \
                    updated_at = excluded.updated_at",
                params![
                    entry.org_id,
                    entry.process,
                    entry.machine_group,
                    entry.day,
                    entry.capacity_minutes,
                    booked_minutes,
                    notes,
                ],
            )?;

            upserted += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(upserted)
    }
}
