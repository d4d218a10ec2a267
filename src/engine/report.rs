// ==========================================
// 车队维保配件对账系统 - 工单报告构建引擎
// ==========================================
// 职责: 复合入口 buildReport(台账 → 对账 → 状态 → 可安装清单)
// 红线: 报告端点与安装校验共用此唯一入口, 避免各处自行派生后互相漂移
// 红线: 读侧幂等, 无写入介入时两次构建结果逐字节一致
// ==========================================

use crate::domain::parts::{InstallationRecord, IssuedLine};
use crate::domain::report::{ReportTotals, WorkOrderReport};
use crate::domain::types::QaResult;
use crate::engine::installable::InstallableCalculator;
use crate::engine::ledger::LedgerAggregator;
use crate::engine::reconciliation::ReconciliationEngine;
use crate::engine::report_status::ReportStatusResolver;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// WorkOrderRecords Trait
// ==========================================
// 用途: 宿主服务提供的原始记录读取接口
// 实现者: SqliteWorkOrderRecords（从 SQLite 仓储读取）
#[async_trait]
pub trait WorkOrderRecords: Send + Sync {
    /// 读取工单全量领料行
    async fn fetch_issued_lines(&self, work_order_id: &str) -> anyhow::Result<Vec<IssuedLine>>;

    /// 读取工单全量安装记录
    async fn fetch_installations(
        &self,
        work_order_id: &str,
    ) -> anyhow::Result<Vec<InstallationRecord>>;

    /// 读取工单质检结果（未质检时为 None）
    async fn fetch_qa_result(&self, work_order_id: &str) -> anyhow::Result<Option<QaResult>>;
}

// ==========================================
// ReportBuilder - 工单报告构建引擎
// ==========================================
pub struct ReportBuilder<R>
where
    R: WorkOrderRecords,
{
    records: Arc<R>,
}

impl<R> ReportBuilder<R>
where
    R: WorkOrderRecords,
{
    /// 创建新的 ReportBuilder 实例
    ///
    /// # 参数
    /// - records: 原始记录读取接口
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// 构建工单对账报告（主入口）
    ///
    /// # 流程
    /// 1. 读取领料行/安装记录/质检结果
    /// 2. 台账聚合（LedgerAggregator）
    /// 3. 三分类对账（ReconciliationEngine）
    /// 4. 状态判定（ReportStatusResolver）
    /// 5. 可安装清单（InstallableCalculator）
    ///
    /// # 错误
    /// - 记录读取失败, 或源数据损坏（DataIntegrity）
    #[instrument(skip(self))]
    pub async fn build_report(&self, work_order_id: &str) -> anyhow::Result<WorkOrderReport> {
        let issued_lines = self.records.fetch_issued_lines(work_order_id).await?;
        let installations = self.records.fetch_installations(work_order_id).await?;
        let qa_result = self.records.fetch_qa_result(work_order_id).await?;

        Ok(build_from_records(
            work_order_id,
            &issued_lines,
            &installations,
            qa_result,
        )?)
    }
}

/// 由已读取的记录构建报告（纯函数部分, 供完工路径在仓储读取后复用）
pub fn build_from_records(
    work_order_id: &str,
    issued_lines: &[IssuedLine],
    installations: &[InstallationRecord],
    qa_result: Option<QaResult>,
) -> Result<WorkOrderReport, crate::engine::error::EngineError> {
    let ledger = LedgerAggregator::aggregate(issued_lines, installations)?;
    let reconciliation = ReconciliationEngine::reconcile(&ledger, issued_lines);
    let report_status = ReportStatusResolver::resolve_status(&reconciliation, qa_result);
    let installable_parts =
        InstallableCalculator::compute_installable(&ledger, issued_lines, installations);

    // 工单级汇总
    let mut totals = ReportTotals::default();
    for entry in ledger.values() {
        totals.issued_qty += entry.issued_qty;
        totals.installed_qty += entry.installed_qty;
        totals.remaining_qty += entry.remaining_qty;
    }
    for line in issued_lines {
        totals.issued_cost += line.qty * line.unit_cost;
    }

    Ok(WorkOrderReport {
        work_order_id: work_order_id.to_string(),
        ledger: ledger.into_values().collect(),
        reconciliation,
        report_status,
        installable_parts,
        totals,
    })
}
