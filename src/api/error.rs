// ==========================================
// 车队维保配件对账系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换引擎/仓储错误为用户友好的错误消息
// 红线: 按类型化变体映射用户提示, 不做字符串匹配
// ==========================================

use crate::engine::error::{EngineError, GateError};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与查找错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 写入边界校验错误（携带类型化引擎错误, 领料与安装共用）
    // ==========================================
    #[error("写入校验拒绝: {0}")]
    ValidationRejected(#[source] EngineError),

    // ==========================================
    // 完工闸门错误（携带实际报告状态/角色）
    // ==========================================
    #[error("完工被拒绝: {0}")]
    CompletionRejected(#[source] GateError),

    // ==========================================
    // 并发冲突
    // ==========================================
    #[error("并发写入冲突: {0}")]
    Conflict(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 系统内部错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            // 事务内校验拒绝 → 保留类型化引擎错误
            RepositoryError::InstallationRejected(e) => ApiError::ValidationRejected(e),
            // 唯一索引兜底命中（并发安装同一序列化件号）
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),
            RepositoryError::InvalidStateTransition { from, to } => {
                ApiError::BusinessRuleViolation(format!("无效的状态转换: {} → {}", from, to))
            }
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InternalError(format!("字段值错误 (field={}): {}", field, message))
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

// 实现 From<EngineError>
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::ValidationRejected(err)
    }
}

// 实现 From<GateError>
impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::CompletionRejected(err)
    }
}

// 实现 From<anyhow::Error>
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // 底层读取接口可能包装了仓储错误, 优先还原类型化错误
        match err.downcast::<RepositoryError>() {
            Ok(repo_err) => ApiError::from(repo_err),
            Err(other) => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
