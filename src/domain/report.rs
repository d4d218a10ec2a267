// ==========================================
// 车队维保配件对账系统 - 派生报表实体
// ==========================================
// 职责: 定义台账/对账/可安装清单等派生实体
// 红线: 派生实体每次读取时重算, 不跨写入缓存（写入会改变其依赖的合计）
// ==========================================

use crate::domain::types::{PartClassification, ReportStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// PartLedgerEntry - 单配件台账条目
// ==========================================
/// 单配件台账条目（派生, 不落库）
///
/// remaining_qty = issued_qty - installed_qty,
/// 异常场景下可为负数, 必须原样上报, 不得截断为 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLedgerEntry {
    /// 配件ID
    pub part_id: String,
    /// 累计领出数量
    pub issued_qty: f64,
    /// 累计安装数量
    pub installed_qty: f64,
    /// 剩余可装数量（可为负, 负数即异常信号）
    pub remaining_qty: f64,
}

// ==========================================
// ReconciliationBucketEntry - 对账分类条目
// ==========================================
/// 对账分类条目（派生）
///
/// issued_cost = Σ(qty × unit_cost), 按配件汇总, 用于报表展示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationBucketEntry {
    /// 配件ID
    pub part_id: String,
    /// 累计领出数量
    pub issued_qty: f64,
    /// 累计安装数量
    pub installed_qty: f64,
    /// 领料成本合计
    pub issued_cost: f64,
    /// 对账分类
    pub classification: PartClassification,
}

// ==========================================
// ReconciliationResult - 三分类对账结果
// ==========================================
/// 三分类对账结果
///
/// installed_not_issued 为数据完整性异常桶:
/// 永远可展示, 仅阻断完工, 不作为错误抛出。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// 领/装一致
    pub matched: Vec<ReconciliationBucketEntry>,
    /// 已领未装（正常待安装）
    pub issued_not_installed: Vec<ReconciliationBucketEntry>,
    /// 已装未领（异常, 需人工修正）
    pub installed_not_issued: Vec<ReconciliationBucketEntry>,
}

impl ReconciliationResult {
    /// 是否存在任何差异桶（差异存在时阻断质检与完工）
    pub fn has_discrepancy(&self) -> bool {
        !self.issued_not_installed.is_empty() || !self.installed_not_issued.is_empty()
    }
}

// ==========================================
// InstallableRow - 可安装清单行
// ==========================================
/// 可安装清单行（安装录入表单的数据契约）
///
/// 仅当 remaining_qty > 容差 时返回该行;
/// installable_serials = 已领出且尚未安装的序列化件号。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallableRow {
    /// 配件ID
    pub part_id: String,
    /// 累计领出数量
    pub issued_qty: f64,
    /// 累计安装数量
    pub installed_qty: f64,
    /// 剩余可装数量
    pub remaining_qty: f64,
    /// 可安装的序列化件号
    pub installable_serials: Vec<String>,
}

// ==========================================
// InstallationRequest - 安装提交请求
// ==========================================
/// 安装提交请求（写入边界的输入, 校验通过后才生成 InstallationRecord）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationRequest {
    /// 配件ID
    pub part_id: String,
    /// 序列化件号（散装件为 None）
    pub part_item_id: Option<String>,
    /// 安装数量
    pub qty_installed: f64,
    /// 安装时里程表读数
    pub odometer_at_install: Option<f64>,
    /// 备注
    pub notes: Option<String>,
}

// ==========================================
// ReportTotals - 工单汇总
// ==========================================
/// 工单级汇总（report_runtime.totals）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// 领出数量合计
    pub issued_qty: f64,
    /// 安装数量合计
    pub installed_qty: f64,
    /// 剩余数量合计
    pub remaining_qty: f64,
    /// 领料成本合计
    pub issued_cost: f64,
}

// ==========================================
// WorkOrderReport - 工单对账报告
// ==========================================
/// 工单对账报告（buildReport 复合输出）
///
/// 报告端点与安装校验共用的唯一入口;
/// 无写入介入时两次构建结果逐字节一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderReport {
    /// 工单ID
    pub work_order_id: String,
    /// 单配件台账（按 part_id 排序）
    pub ledger: Vec<PartLedgerEntry>,
    /// 三分类对账结果
    pub reconciliation: ReconciliationResult,
    /// 报告状态
    pub report_status: ReportStatus,
    /// 可安装清单
    pub installable_parts: Vec<InstallableRow>,
    /// 工单汇总
    pub totals: ReportTotals,
}
