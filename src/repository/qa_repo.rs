// ==========================================
// 车队维保配件对账系统 - 质检结果仓储
// ==========================================
// 职责: 管理 qa_result 表（每工单至多一条, 覆盖写）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::QaResult;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// QaResultRepository - 质检结果仓储
// ==========================================
pub struct QaResultRepository {
    conn: Arc<Mutex<Connection>>,
}

impl QaResultRepository {
    /// 创建新的 QaResultRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// QaResult 转字符串
    fn result_to_str(result: &QaResult) -> &'static str {
        match result {
            QaResult::Pass => "PASS",
            QaResult::Fail => "FAIL",
        }
    }

    /// 字符串转 QaResult
    fn str_to_result(s: &str) -> RepositoryResult<QaResult> {
        match s {
            "PASS" => Ok(QaResult::Pass),
            "FAIL" => Ok(QaResult::Fail),
            other => Err(RepositoryError::FieldValueError {
                field: "result".to_string(),
                message: format!("unknown qa result: {}", other),
            }),
        }
    }

    /// 记录质检结果（覆盖写, 复检以最新为准）
    pub fn set_result(
        &self,
        work_order_id: &str,
        result: QaResult,
        recorded_by: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO qa_result (work_order_id, result, recorded_at, recorded_by)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(work_order_id)
            DO UPDATE SET result = ?2, recorded_at = ?3, recorded_by = ?4
            "#,
            params![
                work_order_id,
                Self::result_to_str(&result),
                Utc::now().to_rfc3339(),
                recorded_by,
            ],
        )?;
        Ok(())
    }

    /// 读取质检结果（未质检时返回 None）
    pub fn get_result(&self, work_order_id: &str) -> RepositoryResult<Option<QaResult>> {
        let conn = self.get_conn()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT result FROM qa_result WHERE work_order_id = ?1",
                params![work_order_id],
                |row| row.get(0),
            )
            .optional()?;

        value.map(|s| Self::str_to_result(&s)).transpose()
    }
}
