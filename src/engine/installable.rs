// ==========================================
// 车队维保配件对账系统 - 剩余可装计算引擎
// ==========================================
// 职责: 派生单配件(及单序列化件)的剩余可装能力 + 安装提交校验
// 输入: 台账 + 领料行 + 安装记录
// 输出: 可安装清单（安装录入表单的数据契约）
// 红线: 每次安装写入成功后必须重算, 不得跨写入缓存
// 红线: 校验按固定顺序短路, 每步返回命名错误
// ==========================================

use crate::domain::parts::{InstallationRecord, IssuedLine};
use crate::domain::report::{InstallableRow, InstallationRequest, PartLedgerEntry};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::unit_mode::UnitModeClassifier;
use crate::QTY_EPSILON;
use std::collections::{BTreeMap, HashSet};

// ==========================================
// InstallableCalculator - 剩余可装计算引擎
// ==========================================
pub struct InstallableCalculator;

impl InstallableCalculator {
    /// 计算可安装清单
    ///
    /// # 参数
    /// - ledger: 台账聚合结果
    /// - issued_lines: 本工单全量领料行（用于收集已领序列化件号）
    /// - installations: 本工单全量安装记录（用于排除已装件号）
    ///
    /// # 返回
    /// - Vec<InstallableRow>: 仅含 remaining_qty > 容差 的配件行,
    ///   installable_serials 为已领出且尚未安装的件号（保持领出顺序）
    pub fn compute_installable(
        ledger: &BTreeMap<String, PartLedgerEntry>,
        issued_lines: &[IssuedLine],
        installations: &[InstallationRecord],
    ) -> Vec<InstallableRow> {
        // 已安装的序列化件号集合
        let installed_serials: HashSet<&str> = installations
            .iter()
            .filter_map(|r| r.part_item_id.as_deref())
            .collect();

        let mut rows = Vec::new();
        for entry in ledger.values() {
            // 已装满或异常超装的配件不进入可安装清单
            if entry.remaining_qty <= QTY_EPSILON {
                continue;
            }

            // 已领出且尚未安装的序列化件号
            let installable_serials: Vec<String> = issued_lines
                .iter()
                .filter(|line| line.part_id == entry.part_id)
                .filter_map(|line| line.part_item_id.as_deref())
                .filter(|serial| !installed_serials.contains(serial))
                .map(|serial| serial.to_string())
                .collect();

            rows.push(InstallableRow {
                part_id: entry.part_id.clone(),
                issued_qty: entry.issued_qty,
                installed_qty: entry.installed_qty,
                remaining_qty: entry.remaining_qty,
                installable_serials,
            });
        }
        rows
    }

    /// 安装提交校验（固定顺序, 每步短路）
    ///
    /// # 校验顺序
    /// 1. 配件必须出现在可安装清单 → PartNotIssuedOrFullyInstalled
    /// 2. 存在待装序列化件时必须指定其中一个件号, 数量强制为 1
    ///    → SerialRequired / SerialAlreadyInstalled
    /// 3. 纯散装件数量必须 > 0 且 ≤ 剩余数量（容差内）
    ///    → QuantityExceedsRemaining
    /// 4. 里程表读数（若提供）必须 ≥ 0 → InvalidOdometer
    ///
    /// # 返回
    /// - Ok(f64): 实际生效的安装数量（序列化件强制为 1.0）
    pub fn validate_installation(
        request: &InstallationRequest,
        installable: &[InstallableRow],
    ) -> EngineResult<f64> {
        // === 步骤 1: 配件必须可安装 ===
        let row = installable
            .iter()
            .find(|r| r.part_id == request.part_id)
            .ok_or_else(|| EngineError::PartNotIssuedOrFullyInstalled {
                part_id: request.part_id.clone(),
            })?;

        // === 步骤 2: 序列化件处理 ===
        let effective_qty = if !row.installable_serials.is_empty() || request.part_item_id.is_some()
        {
            let part_item_id = match request.part_item_id.as_deref() {
                Some(id) => id,
                None => {
                    // 存在待装序列化件却未指定件号
                    return Err(EngineError::SerialRequired {
                        part_id: request.part_id.clone(),
                    });
                }
            };

            if !row.installable_serials.iter().any(|s| s.as_str() == part_item_id) {
                // 件号未领出或已被安装
                return Err(EngineError::SerialAlreadyInstalled {
                    part_id: request.part_id.clone(),
                    part_item_id: part_item_id.to_string(),
                });
            }

            // 序列化件提交数量必须为 1（写入边界校验）
            UnitModeClassifier::validate_quantity(
                UnitModeClassifier::classify(Some(part_item_id)),
                request.qty_installed,
            )?;

            // 数量强制为 1
            1.0
        } else {
            // === 步骤 3: 散装件数量校验 ===
            UnitModeClassifier::validate_quantity(
                UnitModeClassifier::classify(None),
                request.qty_installed,
            )?;

            if request.qty_installed > row.remaining_qty + QTY_EPSILON {
                return Err(EngineError::QuantityExceedsRemaining {
                    part_id: request.part_id.clone(),
                    requested: request.qty_installed,
                    remaining: row.remaining_qty,
                });
            }

            request.qty_installed
        };

        // === 步骤 4: 里程表读数校验 ===
        if let Some(odometer) = request.odometer_at_install {
            if odometer < 0.0 {
                return Err(EngineError::InvalidOdometer { value: odometer });
            }
        }

        Ok(effective_qty)
    }
}
