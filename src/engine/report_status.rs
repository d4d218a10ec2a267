// ==========================================
// 车队维保配件对账系统 - 报告状态判定引擎
// ==========================================
// 职责: 由对账结果 + 质检结果判定唯一报告状态
// 红线: 严格优先级判定, 配件差异优先于质检
// 依据: 配件/成本数据不可信时不应进行质检签核
// ==========================================

use crate::domain::report::ReconciliationResult;
use crate::domain::types::{QaResult, ReportStatus};

// ==========================================
// ReportStatusResolver - 报告状态判定引擎
// ==========================================
pub struct ReportStatusResolver;

impl ReportStatusResolver {
    /// 判定报告状态（严格优先级, 自上而下短路）
    ///
    /// 1. 任一差异桶非空 → NEEDS_PARTS_RECONCILIATION（最高优先级, 完全阻断质检）
    /// 2. 质检结果缺失 → NEEDS_QA
    /// 3. 质检结果为 FAIL → QA_FAILED
    /// 4. 质检通过且配件全部对账 → OK
    pub fn resolve_status(
        reconciliation: &ReconciliationResult,
        qa_result: Option<QaResult>,
    ) -> ReportStatus {
        if reconciliation.has_discrepancy() {
            return ReportStatus::NeedsPartsReconciliation;
        }

        match qa_result {
            None => ReportStatus::NeedsQa,
            Some(QaResult::Fail) => ReportStatus::QaFailed,
            Some(QaResult::Pass) => ReportStatus::Ok,
        }
    }
}
