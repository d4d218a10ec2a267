// ==========================================
// 车队维保配件对账系统 - 领料行仓储
// ==========================================
// 职责: 管理 issued_line 表的追加与查询
// 红线: 领料行为追加式, 无 UPDATE 路径, 更正通过追加新行完成
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::parts::IssuedLine;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// IssueRepository - 领料行仓储
// ==========================================
pub struct IssueRepository {
    conn: Arc<Mutex<Connection>>,
}

impl IssueRepository {
    /// 创建新的 IssueRepository 实例
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

    /// 追加领料行
    ///
    /// 调用方（API 层）负责在写入前完成计量模式校验。
    pub fn insert(&self, work_order_id: &str, line: &IssuedLine) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO issued_line
                (issue_id, work_order_id, part_id, part_item_id, qty, unit_cost, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                line.issue_id,
                work_order_id,
                line.part_id,
                line.part_item_id,
                line.qty,
                line.unit_cost,
                line.notes,
            ],
        )?;
        Ok(())
    }

    /// 读取工单全量领料行（按写入顺序）
    pub fn list_by_work_order(&self, work_order_id: &str) -> RepositoryResult<Vec<IssuedLine>> {
        let conn = self.get_conn()?;
        Self::list_with_conn(&conn, work_order_id)
    }

    /// 在已持有的连接上读取领料行（供安装写入事务内复用）
    pub fn list_with_conn(
        conn: &Connection,
        work_order_id: &str,
    ) -> RepositoryResult<Vec<IssuedLine>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT issue_id, part_id, part_item_id, qty, unit_cost, notes
            FROM issued_line
            WHERE work_order_id = ?1
            ORDER BY line_id
            "#,
        )?;
        let rows = stmt.query_map(params![work_order_id], |row| {
            Ok(IssuedLine {
                issue_id: row.get(0)?,
                part_id: row.get(1)?,
                part_item_id: row.get(2)?,
                qty: row.get(3)?,
                unit_cost: row.get(4)?,
                notes: row.get(5)?,
            })
        })?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }
}
