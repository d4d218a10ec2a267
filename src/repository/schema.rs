// ==========================================
// 车队维保配件对账系统 - 数据库 Schema
// ==========================================
// 职责: 建表语句统一维护（工单/领料行/安装记录/质检结果）
// 红线: 序列化件唯一性由数据库唯一索引在写入边界强制,
//       不能只依赖读取时过滤（并发写入场景）
// ==========================================

use crate::db::CURRENT_SCHEMA_VERSION;
use rusqlite::Connection;

use super::error::RepositoryResult;

/// 初始化数据库 schema（幂等）
pub fn init_schema(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- 工单
        CREATE TABLE IF NOT EXISTS work_order (
            work_order_id TEXT PRIMARY KEY,
            vehicle_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'OPEN'
                CHECK (status IN ('OPEN','IN_PROGRESS','COMPLETED','CANCELED')),
            opened_at TEXT NOT NULL,
            completed_at TEXT,
            completed_by TEXT
        );

        -- 领料行（追加式, 写入后不可修改数量）
        CREATE TABLE IF NOT EXISTS issued_line (
            line_id INTEGER PRIMARY KEY AUTOINCREMENT,
            issue_id TEXT NOT NULL,
            work_order_id TEXT NOT NULL REFERENCES work_order(work_order_id),
            part_id TEXT NOT NULL,
            part_item_id TEXT,
            qty REAL NOT NULL CHECK (qty >= 0),
            unit_cost REAL NOT NULL,
            notes TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_issued_line_work_order
            ON issued_line(work_order_id, part_id);

        -- 安装记录（追加式）
        CREATE TABLE IF NOT EXISTS installation (
            id TEXT PRIMARY KEY,
            work_order_id TEXT NOT NULL REFERENCES work_order(work_order_id),
            part_id TEXT NOT NULL,
            part_item_id TEXT,
            qty_installed REAL NOT NULL CHECK (qty_installed >= 0),
            odometer_at_install REAL,
            installed_at TEXT NOT NULL,
            notes TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_installation_work_order
            ON installation(work_order_id, part_id);

        -- 序列化件唯一性: 同一工单内同一件号至多安装一次
        CREATE UNIQUE INDEX IF NOT EXISTS idx_installation_serial_unique
            ON installation(work_order_id, part_item_id)
            WHERE part_item_id IS NOT NULL;

        -- 质检结果（每工单至多一条, 覆盖写）
        CREATE TABLE IF NOT EXISTS qa_result (
            work_order_id TEXT PRIMARY KEY REFERENCES work_order(work_order_id),
            result TEXT NOT NULL CHECK (result IN ('PASS','FAIL')),
            recorded_at TEXT NOT NULL,
            recorded_by TEXT
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}
