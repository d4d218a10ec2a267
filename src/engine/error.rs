// ==========================================
// 车队维保配件对账系统 - 引擎层错误类型
// ==========================================
// 职责: 定义类型化的校验/闸门错误
// 红线: 所有错误为类型化返回值, 宿主服务按变体映射用户提示,
//       不得依赖错误文案做字符串匹配
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::{ActorRole, ReportStatus, WorkOrderStatus};
use thiserror::Error;

/// 引擎层错误类型
///
/// 4.2/4.3 写入校验失败均在任何持久化写入之前检出,
/// 引擎不允许部分生效的安装。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 写入边界校验错误 =====
    /// 写入输入不合法（如序列化件数量 ≠ 1）
    #[error("输入校验失败: {0}")]
    Validation(String),

    /// 配件未领出或已装满
    #[error("配件未领出或已装满: part_id={part_id}")]
    PartNotIssuedOrFullyInstalled { part_id: String },

    /// 该配件存在待装序列化件, 必须指定件号
    #[error("必须指定序列化件号: part_id={part_id}")]
    SerialRequired { part_id: String },

    /// 序列化件号已被安装
    #[error("序列化件号已安装: part_id={part_id}, part_item_id={part_item_id}")]
    SerialAlreadyInstalled {
        part_id: String,
        part_item_id: String,
    },

    /// 安装数量超出剩余可装数量
    #[error("安装数量超出剩余: part_id={part_id}, requested={requested}, remaining={remaining}")]
    QuantityExceedsRemaining {
        part_id: String,
        requested: f64,
        remaining: f64,
    },

    /// 里程表读数不合法（必须 ≥ 0）
    #[error("里程表读数不合法: {value}")]
    InvalidOdometer { value: f64 },

    // ===== 数据完整性错误 =====
    /// 源数据损坏（如负数领出数量）, 不得静默归零
    #[error("数据完整性错误: {0}")]
    DataIntegrity(String),
}

/// 完工闸门错误类型
///
/// NotReconciledOrQaPending 携带实际报告状态,
/// 调用方据此渲染正确的整改提示。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// 工单已处于终态（COMPLETED / CANCELED）
    #[error("工单已处于终态: status={status}")]
    AlreadyTerminal { status: WorkOrderStatus },

    /// 对账未完成或质检未通过
    #[error("对账未完成或质检未通过: report_status={status}")]
    NotReconciledOrQaPending { status: ReportStatus },

    /// 操作角色无完工权限
    #[error("无完工权限: role={role}")]
    Forbidden { role: ActorRole },
}

/// 引擎层 Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
