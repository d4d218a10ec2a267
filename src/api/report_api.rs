// ==========================================
// 车队维保配件对账系统 - 工单报告 API
// ==========================================
// 职责: 封装 ReportBuilder, 提供工单报告查询与 API 响应序列化
// 架构: API 层 → 引擎层 (ReportBuilder) → 仓储层 (WorkOrderRecords)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::report::WorkOrderReport;
use crate::engine::report::{ReportBuilder, WorkOrderRecords};
use serde_json::json;
use std::sync::Arc;

// ==========================================
// WorkOrderReportApi - 工单报告 API
// ==========================================

/// 工单报告API
///
/// 报告端点与安装录入表单共用 build_report 唯一入口,
/// 避免"可安装清单"与"对账表"各自派生后互相漂移。
pub struct WorkOrderReportApi<R>
where
    R: WorkOrderRecords,
{
    records: Arc<R>,
    builder: ReportBuilder<R>,
}

impl<R> WorkOrderReportApi<R>
where
    R: WorkOrderRecords,
{
    /// 创建新的WorkOrderReportApi实例
    pub fn new(records: Arc<R>) -> Self {
        Self {
            records: Arc::clone(&records),
            builder: ReportBuilder::new(records),
        }
    }

    /// 查询工单对账报告
    ///
    /// # 返回
    /// - Ok(WorkOrderReport): 台账 + 对账 + 状态 + 可安装清单
    pub async fn get_report(&self, work_order_id: &str) -> ApiResult<WorkOrderReport> {
        if work_order_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("工单ID不能为空".to_string()));
        }
        Ok(self.builder.build_report(work_order_id).await?)
    }

    /// 查询工单对账报告并序列化为 API 响应形状
    ///
    /// # 响应形状
    /// { report_status, report_runtime: { totals, issued, installed, reconciliation } }
    pub async fn get_report_response(&self, work_order_id: &str) -> ApiResult<serde_json::Value> {
        let report = self.get_report(work_order_id).await?;
        let issued = self.records.fetch_issued_lines(work_order_id).await?;
        let installed = self.records.fetch_installations(work_order_id).await?;

        Ok(json!({
            "report_status": report.report_status,
            "report_runtime": {
                "totals": report.totals,
                "issued": issued,
                "installed": installed,
                "reconciliation": report.reconciliation,
            },
        }))
    }
}
