// ==========================================
// 车队维保配件对账系统 - 三分类对账引擎
// ==========================================
// 职责: 按配件比对领/装台账, 归入三个分类桶
// 输入: 台账 + 领料行（计算领料成本）
// 输出: ReconciliationResult { matched, issued_not_installed, installed_not_issued }
// 红线: 全函数且纯函数, 对任意合法台账不抛错
// 红线: installed_not_issued 为异常, 必须上报给操作员, 不得静默丢弃
// ==========================================

use crate::domain::parts::IssuedLine;
use crate::domain::report::{PartLedgerEntry, ReconciliationBucketEntry, ReconciliationResult};
use crate::domain::types::PartClassification;
use crate::QTY_EPSILON;
use std::collections::BTreeMap;

// ==========================================
// ReconciliationEngine - 三分类对账引擎
// ==========================================
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// 对账: 将台账中每个配件归入三分类桶
    ///
    /// # 分类规则（容差内比较）
    /// - issued_qty == installed_qty → matched
    /// - issued_qty >  installed_qty → issued_not_installed（正常待安装）
    /// - installed_qty > issued_qty  → installed_not_issued（异常）
    ///
    /// 领/装均为 0 的配件与本工单无关, 完全排除。
    pub fn reconcile(
        ledger: &BTreeMap<String, PartLedgerEntry>,
        issued_lines: &[IssuedLine],
    ) -> ReconciliationResult {
        let costs = Self::issued_cost_by_part(issued_lines);

        let mut result = ReconciliationResult::default();
        for entry in ledger.values() {
            // 未领未装 → 与本工单无关
            if entry.issued_qty.abs() <= QTY_EPSILON && entry.installed_qty.abs() <= QTY_EPSILON {
                continue;
            }

            let classification = if (entry.issued_qty - entry.installed_qty).abs() <= QTY_EPSILON {
                PartClassification::Matched
            } else if entry.issued_qty > entry.installed_qty {
                PartClassification::IssuedNotInstalled
            } else {
                PartClassification::InstalledNotIssued
            };

            let bucket_entry = ReconciliationBucketEntry {
                part_id: entry.part_id.clone(),
                issued_qty: entry.issued_qty,
                installed_qty: entry.installed_qty,
                issued_cost: costs.get(&entry.part_id).copied().unwrap_or(0.0),
                classification,
            };

            match classification {
                PartClassification::Matched => result.matched.push(bucket_entry),
                PartClassification::IssuedNotInstalled => {
                    result.issued_not_installed.push(bucket_entry)
                }
                PartClassification::InstalledNotIssued => {
                    result.installed_not_issued.push(bucket_entry)
                }
            }
        }
        result
    }

    /// 按配件汇总领料成本 Σ(qty × unit_cost)
    fn issued_cost_by_part(issued_lines: &[IssuedLine]) -> BTreeMap<String, f64> {
        let mut costs: BTreeMap<String, f64> = BTreeMap::new();
        for line in issued_lines {
            *costs.entry(line.part_id.clone()).or_insert(0.0) += line.qty * line.unit_cost;
        }
        costs
    }
}
