// ==========================================
// 车队维保配件对账系统 - 工单聚合根
// ==========================================
// 职责: 工单实体定义
// 红线: 工单仅通过显式操作变更（新增领料行/新增安装记录/完工）
// ==========================================

use crate::domain::types::WorkOrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 工单（聚合根）
///
/// 持有本工单范围内的领料行与安装记录（经由仓储读取），
/// 状态流转: OPEN → IN_PROGRESS → COMPLETED, 或 CANCELED（终态）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    /// 工单ID
    pub work_order_id: String,
    /// 车辆ID
    pub vehicle_id: String,
    /// 工单状态
    pub status: WorkOrderStatus,
    /// 开单时间
    pub opened_at: DateTime<Utc>,
    /// 完工时间（仅 COMPLETED 状态有值）
    pub completed_at: Option<DateTime<Utc>>,
    /// 完工操作人（审计字段）
    pub completed_by: Option<String>,
}

impl WorkOrder {
    /// 创建新工单（初始状态 OPEN）
    pub fn new(work_order_id: &str, vehicle_id: &str) -> Self {
        Self {
            work_order_id: work_order_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            status: WorkOrderStatus::Open,
            opened_at: Utc::now(),
            completed_at: None,
            completed_by: None,
        }
    }

    /// 是否处于终态
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
