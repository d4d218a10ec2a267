// ==========================================
// 车队维保配件对账系统 - 引擎层
// ==========================================
// 职责: 实现对账/闸门业务规则, 不拼 SQL
// 红线: Engine 不拼 SQL, 全部为输入数据的纯函数
// 红线: 所有校验在持久化写入之前完成
// ==========================================

pub mod completion;
pub mod error;
pub mod installable;
pub mod ledger;
pub mod reconciliation;
pub mod report;
pub mod report_status;
pub mod unit_mode;

// 重导出核心引擎
pub use completion::CompletionGate;
pub use installable::InstallableCalculator;
pub use ledger::LedgerAggregator;
pub use reconciliation::ReconciliationEngine;
pub use report::{build_from_records, ReportBuilder, WorkOrderRecords};
pub use report_status::ReportStatusResolver;
pub use unit_mode::UnitModeClassifier;
