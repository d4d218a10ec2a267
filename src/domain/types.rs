// ==========================================
// 车队维保配件对账系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 红线: COMPLETED / CANCELED 为终态, 不可逆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Open,       // 已开单
    InProgress, // 施工中
    Completed,  // 已完工（终态）
    Canceled,   // 已取消（终态）
}

impl WorkOrderStatus {
    /// 是否为终态（完工/取消后不再接受任何变更）
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Canceled)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderStatus::Open => write!(f, "OPEN"),
            WorkOrderStatus::InProgress => write!(f, "IN_PROGRESS"),
            WorkOrderStatus::Completed => write!(f, "COMPLETED"),
            WorkOrderStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

// ==========================================
// 质检结果 (QA Result)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QaResult {
    Pass, // 质检通过
    Fail, // 质检不通过
}

impl fmt::Display for QaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QaResult::Pass => write!(f, "PASS"),
            QaResult::Fail => write!(f, "FAIL"),
        }
    }
}

// ==========================================
// 报告状态 (Report Status)
// ==========================================
// 红线: 严格优先级判定, 配件差异优先于质检
// 依据: 配件/成本数据不可信时不应进行质检签核
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    NeedsPartsReconciliation, // 领料/安装存在差异（最高优先级）
    NeedsQa,                  // 配件已对账, 等待质检
    QaFailed,                 // 质检不通过
    Ok,                       // 对账完成且质检通过, 可完工
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::NeedsPartsReconciliation => write!(f, "NEEDS_PARTS_RECONCILIATION"),
            ReportStatus::NeedsQa => write!(f, "NEEDS_QA"),
            ReportStatus::QaFailed => write!(f, "QA_FAILED"),
            ReportStatus::Ok => write!(f, "OK"),
        }
    }
}

// ==========================================
// 计量模式 (Unit Mode)
// ==========================================
// 序列化件: 按唯一件号跟踪, 数量恒为 1
// 散装件: 仅按数量跟踪
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitMode {
    Serialized, // 序列化件（按件号）
    Bulk,       // 散装件（按数量）
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitMode::Serialized => write!(f, "SERIALIZED"),
            UnitMode::Bulk => write!(f, "BULK"),
        }
    }
}

// ==========================================
// 对账分类 (Part Classification)
// ==========================================
// INSTALLED_NOT_ISSUED 为数据完整性异常, 必须上报, 不得静默吞掉
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartClassification {
    Matched,            // 领/装数量一致
    IssuedNotInstalled, // 已领未装（正常待安装状态）
    InstalledNotIssued, // 已装未领（异常, 需人工修正）
}

impl fmt::Display for PartClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartClassification::Matched => write!(f, "MATCHED"),
            PartClassification::IssuedNotInstalled => write!(f, "ISSUED_NOT_INSTALLED"),
            PartClassification::InstalledNotIssued => write!(f, "INSTALLED_NOT_ISSUED"),
        }
    }
}

// ==========================================
// 操作角色 (Actor Role)
// ==========================================
// 仅 Supervisor / Admin 有权完工工单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    Mechanic,   // 维修工
    Supervisor, // 车间主管
    Admin,      // 系统管理员
}

impl ActorRole {
    /// 是否有权执行工单完工操作
    pub fn can_complete_work_order(&self) -> bool {
        matches!(self, ActorRole::Supervisor | ActorRole::Admin)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRole::Mechanic => write!(f, "MECHANIC"),
            ActorRole::Supervisor => write!(f, "SUPERVISOR"),
            ActorRole::Admin => write!(f, "ADMIN"),
        }
    }
}
