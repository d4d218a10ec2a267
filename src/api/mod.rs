// ==========================================
// 车队维保配件对账系统 - API 层
// ==========================================
// 职责: 业务接口封装, 错误转换为用户友好消息
// 架构: API 层 → 引擎层 → 仓储层
// ==========================================

pub mod error;
pub mod installation_api;
pub mod report_api;
pub mod work_order_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use installation_api::InstallationApi;
pub use report_api::WorkOrderReportApi;
pub use work_order_api::WorkOrderApi;
