// ==========================================
// 交期报价系统 - 交期档位配置仓储
// ==========================================
// 职责: leadtime_profile 表数据访问
// 口径: 按 (组织, 工艺) 读取;部分更新 (全空更新视为无操作)
// ==========================================

use crate::domain::profile::{LeadtimeProfile, ProfileUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 交期档位配置仓储
pub struct ProfileRepository {
    /// 数据库连接
    conn: Arc<Mutex<Connection>>,
}

impl ProfileRepository {
    /// 创建新的档位配置仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 按 (组织, 工艺) 读取档位配置;无行返回 None
    pub fn find(&self, org_id: &str, process: &str) -> RepositoryResult<Option<LeadtimeProfile>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let profile = conn
            .query_row(
                "SELECT id, org_id, process, econ_days, std_days, express_days, \
                        surge_multiplier, created_at, updated_at \
                 FROM leadtime_profile \
                 WHERE org_id = ?1 AND process = ?2",
                rusqlite::params![org_id, process],
                |row| {
                    Ok(LeadtimeProfile {
                        id: row.get(0)?,
                        org_id: row.get(1)?,
                        process: row.get(2)?,
                        econ_days: row.get(3)?,
                        std_days: row.get(4)?,
                        express_days: row.get(5)?,
                        surge_multiplier: row.get(6)?,
                        created_at: row.get(7)?,
                        updated_at: row.get(8)?,
                    })
                },
            )
            .optional()?;

        Ok(profile)
    }

    /// 部分更新档位配置
    ///
    /// # 返回
    /// - true: 行存在且已更新
    /// - false: 无变更字段,或行不存在
    pub fn update_partial(
        &self,
        org_id: &str,
        process: &str,
        update: &ProfileUpdate,
    ) -> RepositoryResult<bool> {
        if update.is_empty() {
            return Ok(false);
        }

        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        // 动态拼接 SET 子句,只更新给定字段
        let mut set_clauses: Vec<&str> = Vec::new();
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(econ_days) = update.econ_days {
            set_clauses.push("econ_days = ?");
            sql_params.push(Box::new(econ_days));
        }
        if let Some(std_days) = update.std_days {
            set_clauses.push("std_days = ?");
            sql_params.push(Box::new(std_days));
        }
        if let Some(express_days) = update.express_days {
            set_clauses.push("express_days = ?");
            sql_params.push(Box::new(express_days));
        }
        if let Some(surge_multiplier) = update.surge_multiplier {
            set_clauses.push("surge_multiplier = ?");
            sql_params.push(Box::new(surge_multiplier));
        }

        let sql = format!(
            "UPDATE leadtime_profile SET {}, updated_at = datetime('now') \
             WHERE org_id = ? AND process = ?",
            set_clauses.join(", ")
        );
        sql_params.push(Box::new(org_id.to_string()));
        sql_params.push(Box::new(process.to_string()));

        let updated = conn.execute(&sql, rusqlite::params_from_iter(sql_params))?;
        Ok(updated > 0)
    }
}
