// ==========================================
// 车队维保配件对账系统 - 工单仓储
// ==========================================
// 职责: 管理 work_order 表的 CRUD 操作
// 红线: Repository 不含业务逻辑, 完工前置判断由完工闸门负责
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::WorkOrderStatus;
use crate::domain::work_order::WorkOrder;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// WorkOrderRepository - 工单仓储
// ==========================================
pub struct WorkOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkOrderRepository {
    /// 创建新的 WorkOrderRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    // ==========================================
    // 枚举类型转换辅助方法
    // ==========================================

    /// WorkOrderStatus 转字符串
    fn status_to_str(status: &WorkOrderStatus) -> &'static str {
        match status {
            WorkOrderStatus::Open => "OPEN",
            WorkOrderStatus::InProgress => "IN_PROGRESS",
            WorkOrderStatus::Completed => "COMPLETED",
            WorkOrderStatus::Canceled => "CANCELED",
        }
    }

    /// 字符串转 WorkOrderStatus
    fn str_to_status(s: &str) -> RepositoryResult<WorkOrderStatus> {
        match s {
            "OPEN" => Ok(WorkOrderStatus::Open),
            "IN_PROGRESS" => Ok(WorkOrderStatus::InProgress),
            "COMPLETED" => Ok(WorkOrderStatus::Completed),
            "CANCELED" => Ok(WorkOrderStatus::Canceled),
            other => Err(RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("unknown work order status: {}", other),
            }),
        }
    }

    // ==========================================
    // CRUD 操作
    // ==========================================

    /// 插入新工单
    pub fn insert(&self, work_order: &WorkOrder) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO work_order
                (work_order_id, vehicle_id, status, opened_at, completed_at, completed_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                work_order.work_order_id,
                work_order.vehicle_id,
                Self::status_to_str(&work_order.status),
                work_order.opened_at.to_rfc3339(),
                work_order.completed_at.map(|t| t.to_rfc3339()),
                work_order.completed_by,
            ],
        )?;
        Ok(())
    }

    /// 按ID读取工单
    pub fn get(&self, work_order_id: &str) -> RepositoryResult<WorkOrder> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT work_order_id, vehicle_id, status, opened_at, completed_at, completed_by
                FROM work_order WHERE work_order_id = ?1
                "#,
                params![work_order_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .optional()?;

        let (id, vehicle_id, status, opened_at, completed_at, completed_by) =
            row.ok_or_else(|| RepositoryError::NotFound {
                entity: "WorkOrder".to_string(),
                id: work_order_id.to_string(),
            })?;

        Ok(WorkOrder {
            work_order_id: id,
            vehicle_id,
            status: Self::str_to_status(&status)?,
            opened_at: Self::parse_datetime("opened_at", &opened_at)?,
            completed_at: completed_at
                .map(|t| Self::parse_datetime("completed_at", &t))
                .transpose()?,
            completed_by,
        })
    }

    /// 更新工单状态（非终态流转, 如 OPEN → IN_PROGRESS）
    pub fn update_status(
        &self,
        work_order_id: &str,
        status: WorkOrderStatus,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE work_order SET status = ?1 WHERE work_order_id = ?2",
            params![Self::status_to_str(&status), work_order_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "WorkOrder".to_string(),
                id: work_order_id.to_string(),
            });
        }
        Ok(())
    }

    /// 持久化完工结果（状态 + 完工时间 + 操作人, 由完工闸门判定通过后调用）
    pub fn mark_completed(&self, work_order: &WorkOrder) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE work_order
            SET status = 'COMPLETED', completed_at = ?1, completed_by = ?2
            WHERE work_order_id = ?3 AND status NOT IN ('COMPLETED', 'CANCELED')
            "#,
            params![
                work_order.completed_at.map(|t| t.to_rfc3339()),
                work_order.completed_by,
                work_order.work_order_id,
            ],
        )?;
        if affected == 0 {
            // 不存在, 或已处于终态（并发完工防护）
            return Err(RepositoryError::InvalidStateTransition {
                from: "TERMINAL_OR_MISSING".to_string(),
                to: "COMPLETED".to_string(),
            });
        }
        Ok(())
    }

    /// RFC3339 时间解析
    fn parse_datetime(field: &str, value: &str) -> RepositoryResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| RepositoryError::FieldValueError {
                field: field.to_string(),
                message: e.to_string(),
            })
    }
}
