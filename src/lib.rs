// ==========================================
// 车队维保配件对账系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 领料/安装对账引擎 + 工单完工闸门
// 红线: 完工为单向转换, report_status != OK 时不可完工
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ActorRole, PartClassification, QaResult, ReportStatus, UnitMode, WorkOrderStatus,
};

// 领域实体
pub use domain::{
    InstallableRow, InstallationRecord, InstallationRequest, IssuedLine, Part, PartLedgerEntry,
    ReconciliationBucketEntry, ReconciliationResult, ReportTotals, WorkOrder, WorkOrderReport,
};

// 引擎
pub use engine::{
    CompletionGate, InstallableCalculator, LedgerAggregator, ReconciliationEngine, ReportBuilder,
    ReportStatusResolver, UnitModeClassifier, WorkOrderRecords,
};

// 引擎错误
pub use engine::error::{EngineError, GateError};

// API
pub use api::{InstallationApi, WorkOrderApi, WorkOrderReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车队维保配件对账系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// 数量比较容差（吸收浮点数量字段的舍入误差）
pub const QTY_EPSILON: f64 = 0.0005;

// ==========================================
// 预编译检查
// ==========================================
