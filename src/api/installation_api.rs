// ==========================================
// 车队维保配件对账系统 - 领料/安装写入 API
// ==========================================
// 职责: 领料行与安装记录的写入入口
// 红线: 所有校验在持久化写入之前完成, 不存在部分生效的写入
// 红线: 终态工单不再接受任何领料/安装写入
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::parts::{InstallationRecord, IssuedLine};
use crate::domain::report::InstallationRequest;
use crate::engine::unit_mode::UnitModeClassifier;
use crate::repository::installation_repo::InstallationRepository;
use crate::repository::issue_repo::IssueRepository;
use crate::repository::work_order_repo::WorkOrderRepository;
use std::sync::Arc;
use tracing::info;

// ==========================================
// InstallationApi - 领料/安装写入 API
// ==========================================
pub struct InstallationApi {
    work_order_repo: Arc<WorkOrderRepository>,
    issue_repo: Arc<IssueRepository>,
    installation_repo: Arc<InstallationRepository>,
}

impl InstallationApi {
    /// 创建新的InstallationApi实例
    pub fn new(
        work_order_repo: Arc<WorkOrderRepository>,
        issue_repo: Arc<IssueRepository>,
        installation_repo: Arc<InstallationRepository>,
    ) -> Self {
        Self {
            work_order_repo,
            issue_repo,
            installation_repo,
        }
    }

    /// 追加领料行
    ///
    /// # 校验
    /// 1. 工单存在且未处于终态
    /// 2. 计量模式数量约束（序列化件数量必须为 1, 散装件数量必须 > 0）
    pub fn add_issued_line(&self, work_order_id: &str, line: &IssuedLine) -> ApiResult<()> {
        let work_order = self.work_order_repo.get(work_order_id)?;
        if work_order.is_terminal() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "工单已处于终态, 不再接受领料: status={}",
                work_order.status
            )));
        }

        // 写入边界校验: 违规输入不得进入台账
        let mode = UnitModeClassifier::classify(line.part_item_id.as_deref());
        UnitModeClassifier::validate_quantity(mode, line.qty)?;

        self.issue_repo.insert(work_order_id, line)?;
        info!(
            work_order_id = %work_order_id,
            part_id = %line.part_id,
            qty = line.qty,
            "issued line recorded"
        );
        Ok(())
    }

    /// 提交安装记录
    ///
    /// 校验与写入在仓储层单事务内原子完成（读取-校验-写入串行）。
    ///
    /// # 返回
    /// - Ok(InstallationRecord): 已落库的安装记录（序列化件数量强制为 1）
    pub fn add_installation(
        &self,
        work_order_id: &str,
        request: &InstallationRequest,
    ) -> ApiResult<InstallationRecord> {
        let work_order = self.work_order_repo.get(work_order_id)?;
        if work_order.is_terminal() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "工单已处于终态, 不再接受安装: status={}",
                work_order.status
            )));
        }

        let record = self
            .installation_repo
            .insert_validated(work_order_id, request)?;
        Ok(record)
    }
}
