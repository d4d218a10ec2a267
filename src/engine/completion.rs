// ==========================================
// 车队维保配件对账系统 - 工单完工闸门
// ==========================================
// 职责: 唯一有权将工单置为 COMPLETED 终态的引擎
// 红线: 完工为单向转换, 引擎层不存在"取消完工"操作
//       （重新开单属于外部管理动作, 不在本核心契约内）
// ==========================================

use crate::domain::types::{ActorRole, ReportStatus};
use crate::domain::work_order::WorkOrder;
use crate::engine::error::GateError;
use chrono::Utc;
use tracing::info;

// ==========================================
// CompletionGate - 工单完工闸门
// ==========================================
pub struct CompletionGate;

impl CompletionGate {
    /// 完工工单
    ///
    /// # 前置条件（全部必须满足, 按序检查）
    /// 1. 工单未处于终态 → AlreadyTerminal
    /// 2. report_status == OK → NotReconciledOrQaPending（携带实际状态）
    /// 3. 操作角色有完工权限 → Forbidden
    ///
    /// # 成功副作用
    /// - status = COMPLETED, completed_at = now(), completed_by = 操作人
    pub fn complete(
        work_order: &mut WorkOrder,
        report_status: ReportStatus,
        actor_role: ActorRole,
        actor: &str,
    ) -> Result<(), GateError> {
        // === 步骤 1: 终态检查 ===
        if work_order.is_terminal() {
            return Err(GateError::AlreadyTerminal {
                status: work_order.status,
            });
        }

        // === 步骤 2: 报告状态检查 ===
        if report_status != ReportStatus::Ok {
            return Err(GateError::NotReconciledOrQaPending {
                status: report_status,
            });
        }

        // === 步骤 3: 权限检查 ===
        if !actor_role.can_complete_work_order() {
            return Err(GateError::Forbidden { role: actor_role });
        }

        work_order.status = crate::domain::types::WorkOrderStatus::Completed;
        work_order.completed_at = Some(Utc::now());
        work_order.completed_by = Some(actor.to_string());

        info!(
            work_order_id = %work_order.work_order_id,
            actor = %actor,
            "work order completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WorkOrderStatus;

    fn open_work_order() -> WorkOrder {
        WorkOrder::new("WO-1", "VH-1")
    }

    #[test]
    fn test_complete_succeeds_only_when_ok() {
        // 四种报告状态逐一验证, 仅 OK 可完工
        let statuses = [
            ReportStatus::NeedsPartsReconciliation,
            ReportStatus::NeedsQa,
            ReportStatus::QaFailed,
            ReportStatus::Ok,
        ];
        let mut succeeded = 0;
        for status in statuses {
            let mut wo = open_work_order();
            let result =
                CompletionGate::complete(&mut wo, status, ActorRole::Supervisor, "sup-01");
            if result.is_ok() {
                succeeded += 1;
                assert_eq!(status, ReportStatus::Ok);
                assert_eq!(wo.status, WorkOrderStatus::Completed);
                assert!(wo.completed_at.is_some());
                assert_eq!(wo.completed_by.as_deref(), Some("sup-01"));
            } else {
                assert_eq!(wo.status, WorkOrderStatus::Open);
                assert!(matches!(
                    result,
                    Err(GateError::NotReconciledOrQaPending { .. })
                ));
            }
        }
        assert_eq!(succeeded, 1);
    }

    #[test]
    fn test_terminal_work_order_rejected() {
        let mut wo = open_work_order();
        wo.status = WorkOrderStatus::Canceled;
        let result = CompletionGate::complete(&mut wo, ReportStatus::Ok, ActorRole::Admin, "adm");
        assert_eq!(
            result,
            Err(GateError::AlreadyTerminal {
                status: WorkOrderStatus::Canceled
            })
        );
    }

    #[test]
    fn test_completed_work_order_not_completable_twice() {
        let mut wo = open_work_order();
        CompletionGate::complete(&mut wo, ReportStatus::Ok, ActorRole::Supervisor, "sup").unwrap();
        let second = CompletionGate::complete(&mut wo, ReportStatus::Ok, ActorRole::Supervisor, "sup");
        assert_eq!(
            second,
            Err(GateError::AlreadyTerminal {
                status: WorkOrderStatus::Completed
            })
        );
    }

    #[test]
    fn test_mechanic_forbidden() {
        let mut wo = open_work_order();
        let result =
            CompletionGate::complete(&mut wo, ReportStatus::Ok, ActorRole::Mechanic, "mec");
        assert_eq!(
            result,
            Err(GateError::Forbidden {
                role: ActorRole::Mechanic
            })
        );
        assert_eq!(wo.status, WorkOrderStatus::Open);
    }

    #[test]
    fn test_error_carries_actual_status() {
        let mut wo = open_work_order();
        let result = CompletionGate::complete(
            &mut wo,
            ReportStatus::QaFailed,
            ActorRole::Supervisor,
            "sup",
        );
        assert_eq!(
            result,
            Err(GateError::NotReconciledOrQaPending {
                status: ReportStatus::QaFailed
            })
        );
    }
}
