// ==========================================
// 车队维保配件对账系统 - 安装记录仓储
// ==========================================
// 职责: 管理 installation 表的追加与查询
// 红线: 读取-校验-写入必须在同一事务内串行完成,
//       防止并发提交同时观测到相同的写前剩余数量而联合超装
// 红线: 序列化件唯一性由唯一索引兜底, 不能只靠读取时过滤
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::parts::InstallationRecord;
use crate::domain::report::InstallationRequest;
use crate::engine::installable::InstallableCalculator;
use crate::engine::ledger::LedgerAggregator;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::issue_repo::IssueRepository;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

// ==========================================
// InstallationRepository - 安装记录仓储
// ==========================================
pub struct InstallationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InstallationRepository {
    /// 创建新的 InstallationRepository 实例
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

    /// 校验并写入安装记录（原子操作）
    ///
    /// # 流程（单事务内）
    /// 1. 读取工单全量领料行与安装记录
    /// 2. 台账聚合 + 可安装清单重算
    /// 3. 引擎校验（固定顺序短路, 序列化件数量强制为 1）
    /// 4. INSERT 安装记录
    ///
    /// 校验失败 → InstallationRejected（携带类型化引擎错误）, 事务回滚,
    /// 不存在部分生效的安装。
    /// 同件号并发写入由唯一索引兜底 → UniqueConstraintViolation。
    pub fn insert_validated(
        &self,
        work_order_id: &str,
        request: &InstallationRequest,
    ) -> RepositoryResult<InstallationRecord> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // === 步骤 1: 事务内读取最新记录 ===
        let issued_lines = IssueRepository::list_with_conn(&tx, work_order_id)?;
        let installations = Self::list_with_conn(&tx, work_order_id)?;

        // === 步骤 2: 重算台账与可安装清单 ===
        let ledger = LedgerAggregator::aggregate(&issued_lines, &installations)
            .map_err(RepositoryError::InstallationRejected)?;
        let installable =
            InstallableCalculator::compute_installable(&ledger, &issued_lines, &installations);

        // === 步骤 3: 引擎校验 ===
        let effective_qty = InstallableCalculator::validate_installation(request, &installable)
            .map_err(RepositoryError::InstallationRejected)?;

        // === 步骤 4: 写入 ===
        let record = InstallationRecord {
            id: Uuid::new_v4().to_string(),
            part_id: request.part_id.clone(),
            part_item_id: request.part_item_id.clone(),
            qty_installed: effective_qty,
            odometer_at_install: request.odometer_at_install,
            installed_at: Utc::now(),
            notes: request.notes.clone(),
        };
        Self::insert_with_conn(&tx, work_order_id, &record)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        debug!(
            work_order_id = %work_order_id,
            part_id = %record.part_id,
            qty_installed = record.qty_installed,
            "installation accepted"
        );
        Ok(record)
    }

    /// 读取工单全量安装记录（按安装时间顺序）
    pub fn list_by_work_order(
        &self,
        work_order_id: &str,
    ) -> RepositoryResult<Vec<InstallationRecord>> {
        let conn = self.get_conn()?;
        Self::list_with_conn(&conn, work_order_id)
    }

    /// 在已持有的连接上读取安装记录（供安装写入事务内复用）
    pub fn list_with_conn(
        conn: &Connection,
        work_order_id: &str,
    ) -> RepositoryResult<Vec<InstallationRecord>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, part_id, part_item_id, qty_installed, odometer_at_install,
                   installed_at, notes
            FROM installation
            WHERE work_order_id = ?1
            ORDER BY installed_at, id
            "#,
        )?;
        let rows = stmt.query_map(params![work_order_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, Option<f64>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, part_id, part_item_id, qty_installed, odometer, installed_at, notes) = row?;
            records.push(InstallationRecord {
                id,
                part_id,
                part_item_id,
                qty_installed,
                odometer_at_install: odometer,
                installed_at: Self::parse_datetime(&installed_at)?,
                notes,
            });
        }
        Ok(records)
    }

    /// 直接写入安装记录（不经引擎校验, 仅供测试构造异常数据/数据修复使用）
    pub fn insert_unchecked(
        &self,
        work_order_id: &str,
        record: &InstallationRecord,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::insert_with_conn(&conn, work_order_id, record)
    }

    fn insert_with_conn(
        conn: &Connection,
        work_order_id: &str,
        record: &InstallationRecord,
    ) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO installation
                (id, work_order_id, part_id, part_item_id, qty_installed,
                 odometer_at_install, installed_at, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.id,
                work_order_id,
                record.part_id,
                record.part_item_id,
                record.qty_installed,
                record.odometer_at_install,
                record.installed_at.to_rfc3339(),
                record.notes,
            ],
        )?;
        Ok(())
    }

    /// RFC3339 时间解析
    fn parse_datetime(value: &str) -> RepositoryResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| RepositoryError::FieldValueError {
                field: "installed_at".to_string(),
                message: e.to_string(),
            })
    }
}
