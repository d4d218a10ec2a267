// ==========================================
// 车队维保配件对账系统 - 台账聚合引擎
// ==========================================
// 职责: 将原始领料行/安装记录归并为单配件数量台账
// 输入: 同一工单的全量 IssuedLine + InstallationRecord
// 输出: Map<part_id, PartLedgerEntry>
// 红线: 纯函数, 无 I/O 无随机性, 同输入必同输出
// 红线: remaining_qty 可为负（异常信号）, 不得截断为 0
// ==========================================

use crate::domain::parts::{InstallationRecord, IssuedLine};
use crate::domain::report::PartLedgerEntry;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;

// ==========================================
// LedgerAggregator - 台账聚合引擎
// ==========================================
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// 聚合领料行与安装记录为单配件台账
    ///
    /// # 参数
    /// - issued_lines: 本工单全量领料行
    /// - installations: 本工单全量安装记录
    ///
    /// # 返回
    /// - BTreeMap<part_id, PartLedgerEntry>: 按 part_id 有序的台账
    ///   （有序保证读侧输出可复现）
    ///
    /// # 错误
    /// - DataIntegrity: 出现负数领出/安装数量（源数据损坏）
    pub fn aggregate(
        issued_lines: &[IssuedLine],
        installations: &[InstallationRecord],
    ) -> EngineResult<BTreeMap<String, PartLedgerEntry>> {
        let mut ledger: BTreeMap<String, PartLedgerEntry> = BTreeMap::new();

        // === 步骤 1: 累加领出数量 ===
        for line in issued_lines {
            if line.qty < 0.0 {
                return Err(EngineError::DataIntegrity(format!(
                    "negative issued qty: part_id={}, qty={}",
                    line.part_id, line.qty
                )));
            }
            let entry = Self::entry_mut(&mut ledger, &line.part_id);
            entry.issued_qty += line.qty;
        }

        // === 步骤 2: 累加安装数量 ===
        for record in installations {
            if record.qty_installed < 0.0 {
                return Err(EngineError::DataIntegrity(format!(
                    "negative installed qty: part_id={}, qty_installed={}",
                    record.part_id, record.qty_installed
                )));
            }
            let entry = Self::entry_mut(&mut ledger, &record.part_id);
            entry.installed_qty += record.qty_installed;
        }

        // === 步骤 3: 计算剩余数量（负数原样保留） ===
        for entry in ledger.values_mut() {
            entry.remaining_qty = entry.issued_qty - entry.installed_qty;
        }

        Ok(ledger)
    }

    /// 获取或创建台账条目
    fn entry_mut<'a>(
        ledger: &'a mut BTreeMap<String, PartLedgerEntry>,
        part_id: &str,
    ) -> &'a mut PartLedgerEntry {
        ledger
            .entry(part_id.to_string())
            .or_insert_with(|| PartLedgerEntry {
                part_id: part_id.to_string(),
                issued_qty: 0.0,
                installed_qty: 0.0,
                remaining_qty: 0.0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试 1: 同配件多行累加
    // ==========================================

    #[test]
    fn test_aggregate_accumulates_multiple_lines() {
        let issued = vec![
            IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0),
            IssuedLine::bulk("ISS-2", "P1", 1.0, 10.0),
        ];
        let ledger = LedgerAggregator::aggregate(&issued, &[]).unwrap();

        let entry = ledger.get("P1").unwrap();
        assert_eq!(entry.issued_qty, 3.0);
        assert_eq!(entry.installed_qty, 0.0);
        assert_eq!(entry.remaining_qty, 3.0);
    }

    // ==========================================
    // 测试 2: 序列化件与散装件汇入同一条目
    // ==========================================

    #[test]
    fn test_aggregate_mixed_serialized_and_bulk() {
        let issued = vec![
            IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0),
            IssuedLine::serialized("ISS-1", "P1", "S1", 10.0),
        ];
        let ledger = LedgerAggregator::aggregate(&issued, &[]).unwrap();

        assert_eq!(ledger.get("P1").unwrap().issued_qty, 3.0);
    }

    // ==========================================
    // 测试 3: 超装时剩余数量为负, 不截断
    // ==========================================

    #[test]
    fn test_aggregate_negative_remaining_surfaced() {
        let issued = vec![IssuedLine::bulk("ISS-1", "P1", 1.0, 10.0)];
        let installs = vec![InstallationRecord::bulk("P1", 2.0)];
        let ledger = LedgerAggregator::aggregate(&issued, &installs).unwrap();

        assert_eq!(ledger.get("P1").unwrap().remaining_qty, -1.0);
    }

    // ==========================================
    // 测试 4: 负数源数据 → DataIntegrity
    // ==========================================

    #[test]
    fn test_aggregate_negative_issued_qty_rejected() {
        let issued = vec![IssuedLine::bulk("ISS-1", "P1", -1.0, 10.0)];
        let result = LedgerAggregator::aggregate(&issued, &[]);

        assert!(matches!(result, Err(EngineError::DataIntegrity(_))));
    }

    // ==========================================
    // 测试 5: 确定性（同输入必同输出）
    // ==========================================

    #[test]
    fn test_aggregate_deterministic() {
        let issued = vec![
            IssuedLine::bulk("ISS-1", "P2", 1.0, 5.0),
            IssuedLine::bulk("ISS-1", "P1", 3.0, 10.0),
        ];
        let installs = vec![InstallationRecord::bulk("P1", 2.0)];

        let a = LedgerAggregator::aggregate(&issued, &installs).unwrap();
        let b = LedgerAggregator::aggregate(&issued, &installs).unwrap();
        assert_eq!(
            a.values().collect::<Vec<_>>(),
            b.values().collect::<Vec<_>>()
        );
        // BTreeMap 保证 part_id 有序
        let keys: Vec<_> = a.keys().cloned().collect();
        assert_eq!(keys, vec!["P1".to_string(), "P2".to_string()]);
    }
}
