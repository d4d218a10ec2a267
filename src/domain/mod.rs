// ==========================================
// 车队维保配件对账系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、派生报表实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod parts;
pub mod report;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use parts::{InstallationRecord, IssuedLine, Part};
pub use report::{
    InstallableRow, InstallationRequest, PartLedgerEntry, ReconciliationBucketEntry,
    ReconciliationResult, ReportTotals, WorkOrderReport,
};
pub use types::{ActorRole, PartClassification, QaResult, ReportStatus, UnitMode, WorkOrderStatus};
pub use work_order::WorkOrder;
