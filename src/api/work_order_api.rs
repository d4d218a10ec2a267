// ==========================================
// 车队维保配件对账系统 - 工单操作 API
// ==========================================
// 职责: 工单创建/质检记录/完工操作
// 红线: 完工判定必须经由完工闸门, API 层不得自行比较状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::report::WorkOrderReport;
use crate::domain::types::{ActorRole, QaResult, WorkOrderStatus};
use crate::domain::work_order::WorkOrder;
use crate::engine::completion::CompletionGate;
use crate::engine::report::build_from_records;
use crate::repository::installation_repo::InstallationRepository;
use crate::repository::issue_repo::IssueRepository;
use crate::repository::qa_repo::QaResultRepository;
use crate::repository::work_order_repo::WorkOrderRepository;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// WorkOrderApi - 工单操作 API
// ==========================================
pub struct WorkOrderApi {
    work_order_repo: Arc<WorkOrderRepository>,
    issue_repo: Arc<IssueRepository>,
    installation_repo: Arc<InstallationRepository>,
    qa_repo: Arc<QaResultRepository>,
}

impl WorkOrderApi {
    /// 创建新的WorkOrderApi实例
    pub fn new(
        work_order_repo: Arc<WorkOrderRepository>,
        issue_repo: Arc<IssueRepository>,
        installation_repo: Arc<InstallationRepository>,
        qa_repo: Arc<QaResultRepository>,
    ) -> Self {
        Self {
            work_order_repo,
            issue_repo,
            installation_repo,
            qa_repo,
        }
    }

    /// 创建工单（初始状态 OPEN）
    pub fn create_work_order(&self, work_order_id: &str, vehicle_id: &str) -> ApiResult<WorkOrder> {
        if work_order_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("工单ID不能为空".to_string()));
        }
        let work_order = WorkOrder::new(work_order_id, vehicle_id);
        self.work_order_repo.insert(&work_order)?;
        Ok(work_order)
    }

    /// 开始施工（OPEN → IN_PROGRESS）
    pub fn start_work(&self, work_order_id: &str) -> ApiResult<()> {
        let work_order = self.work_order_repo.get(work_order_id)?;
        if work_order.status != WorkOrderStatus::Open {
            return Err(ApiError::BusinessRuleViolation(format!(
                "仅 OPEN 状态可开始施工: status={}",
                work_order.status
            )));
        }
        self.work_order_repo
            .update_status(work_order_id, WorkOrderStatus::InProgress)?;
        Ok(())
    }

    /// 记录质检结果（复检覆盖写）
    ///
    /// 存在配件差异时质检不应进行, 此处仅记录,
    /// 差异仍由报告状态优先级阻断完工。
    pub fn record_qa_result(
        &self,
        work_order_id: &str,
        result: QaResult,
        recorded_by: &str,
    ) -> ApiResult<()> {
        let work_order = self.work_order_repo.get(work_order_id)?;
        if work_order.is_terminal() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "工单已处于终态, 不再接受质检记录: status={}",
                work_order.status
            )));
        }
        self.qa_repo.set_result(work_order_id, result, recorded_by)?;
        Ok(())
    }

    /// 完工工单（唯一入口）
    ///
    /// # 流程
    /// 1. 读取工单
    /// 2. 构建最新对账报告（事务外读取, 完工前最后一次判定）
    /// 3. 完工闸门判定（终态/报告状态/权限）
    /// 4. 持久化完工结果（UPDATE 带终态防护, 并发完工时第二个提交失败）
    pub fn complete_work_order(
        &self,
        work_order_id: &str,
        actor_role: ActorRole,
        actor: &str,
    ) -> ApiResult<WorkOrder> {
        let mut work_order = self.work_order_repo.get(work_order_id)?;
        let report = self.build_report_sync(work_order_id)?;

        if let Err(gate_err) =
            CompletionGate::complete(&mut work_order, report.report_status, actor_role, actor)
        {
            warn!(
                work_order_id = %work_order_id,
                report_status = %report.report_status,
                error = %gate_err,
                "completion rejected"
            );
            return Err(ApiError::CompletionRejected(gate_err));
        }

        self.work_order_repo.mark_completed(&work_order)?;
        info!(
            work_order_id = %work_order_id,
            actor = %actor,
            "work order completed and persisted"
        );
        Ok(work_order)
    }

    /// 同步构建工单报告（完工路径使用, 直接走仓储读取）
    fn build_report_sync(&self, work_order_id: &str) -> ApiResult<WorkOrderReport> {
        let issued_lines = self.issue_repo.list_by_work_order(work_order_id)?;
        let installations = self.installation_repo.list_by_work_order(work_order_id)?;
        let qa_result = self.qa_repo.get_result(work_order_id)?;

        build_from_records(work_order_id, &issued_lines, &installations, qa_result)
            .map_err(ApiError::from)
    }
}
