// ==========================================
// 车队维保配件对账系统 - 配件实体定义
// ==========================================
// 职责: 配件目录 + 领料行 + 安装记录
// 红线: 领料行/安装记录为追加式, 写入后不可原地修改数量
// 红线: part_item_id 存在 ⇒ 序列化件, 数量必须等于 1（写入边界校验）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Part - 配件目录条目
// ==========================================
// 名称/品牌仅用于展示, 引擎范围内不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// 配件ID
    pub part_id: String,
    /// 配件名称（展示用）
    pub name: String,
    /// 品牌（展示用）
    pub brand: Option<String>,
}

// ==========================================
// IssuedLine - 领料行
// ==========================================
/// 领料行（一次领料事件中的一行）
///
/// 同一工单内同一 part_id 的多条领料行在台账中累加。
/// part_item_id 存在时表示序列化件, qty 必须等于 1。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedLine {
    /// 领料单ID
    pub issue_id: String,
    /// 配件ID
    pub part_id: String,
    /// 序列化件号（散装件为 None）
    pub part_item_id: Option<String>,
    /// 领出数量
    pub qty: f64,
    /// 单价（引擎原样携带, 不做任何成本规则）
    pub unit_cost: f64,
    /// 备注
    pub notes: Option<String>,
}

impl IssuedLine {
    /// 创建散装件领料行
    pub fn bulk(issue_id: &str, part_id: &str, qty: f64, unit_cost: f64) -> Self {
        Self {
            issue_id: issue_id.to_string(),
            part_id: part_id.to_string(),
            part_item_id: None,
            qty,
            unit_cost,
            notes: None,
        }
    }

    /// 创建序列化件领料行（数量固定为 1）
    pub fn serialized(issue_id: &str, part_id: &str, part_item_id: &str, unit_cost: f64) -> Self {
        Self {
            issue_id: issue_id.to_string(),
            part_id: part_id.to_string(),
            part_item_id: Some(part_item_id.to_string()),
            qty: 1.0,
            unit_cost,
            notes: None,
        }
    }
}

// ==========================================
// InstallationRecord - 安装记录
// ==========================================
/// 安装记录（一次物理装车）
///
/// part_item_id 存在时表示序列化件, qty_installed 必须等于 1,
/// 且同一件号在工单生命周期内至多出现一次（写入边界唯一约束）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationRecord {
    /// 记录ID
    pub id: String,
    /// 配件ID
    pub part_id: String,
    /// 序列化件号（散装件为 None）
    pub part_item_id: Option<String>,
    /// 安装数量
    pub qty_installed: f64,
    /// 安装时里程表读数（公里, 可缺省）
    pub odometer_at_install: Option<f64>,
    /// 安装时间
    pub installed_at: DateTime<Utc>,
    /// 备注
    pub notes: Option<String>,
}

impl InstallationRecord {
    /// 创建散装件安装记录
    pub fn bulk(part_id: &str, qty_installed: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            part_id: part_id.to_string(),
            part_item_id: None,
            qty_installed,
            odometer_at_install: None,
            installed_at: Utc::now(),
            notes: None,
        }
    }

    /// 创建序列化件安装记录（数量固定为 1）
    pub fn serialized(part_id: &str, part_item_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            part_id: part_id.to_string(),
            part_item_id: Some(part_item_id.to_string()),
            qty_installed: 1.0,
            odometer_at_install: None,
            installed_at: Utc::now(),
            notes: None,
        }
    }
}
