// ==========================================
// InstallableCalculator 引擎测试
// ==========================================
// 测试目标: 验证剩余可装清单派生与安装提交校验顺序
// 覆盖范围: 可装行过滤 / 序列化件号过滤 / 四步短路校验
// ==========================================

use fleet_parts_recon::domain::parts::{InstallationRecord, IssuedLine};
use fleet_parts_recon::domain::report::InstallationRequest;
use fleet_parts_recon::engine::error::EngineError;
use fleet_parts_recon::engine::{InstallableCalculator, LedgerAggregator};

// ==========================================
// 测试辅助函数
// ==========================================

fn request(part_id: &str, part_item_id: Option<&str>, qty: f64) -> InstallationRequest {
    InstallationRequest {
        part_id: part_id.to_string(),
        part_item_id: part_item_id.map(|s| s.to_string()),
        qty_installed: qty,
        odometer_at_install: None,
        notes: None,
    }
}

fn installable(
    issued: &[IssuedLine],
    installs: &[InstallationRecord],
) -> Vec<fleet_parts_recon::domain::report::InstallableRow> {
    let ledger = LedgerAggregator::aggregate(issued, installs).unwrap();
    InstallableCalculator::compute_installable(&ledger, issued, installs)
}

// ==========================================
// 测试用例 1: 已装满的配件不进入可安装清单
// ==========================================

#[test]
fn test_fully_installed_part_excluded() {
    let issued = vec![IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0)];
    let installs = vec![InstallationRecord::bulk("P1", 2.0)];

    let rows = installable(&issued, &installs);
    assert!(rows.is_empty());
}

// ==========================================
// 测试用例 2: 序列化件号只出现在未装列表
// ==========================================

#[test]
fn test_installable_serials_exclude_installed() {
    let issued = vec![
        IssuedLine::serialized("ISS-1", "P2", "S1", 100.0),
        IssuedLine::serialized("ISS-1", "P2", "S2", 100.0),
    ];
    let installs = vec![InstallationRecord::serialized("P2", "S1")];

    let rows = installable(&issued, &installs);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].installable_serials, vec!["S2".to_string()]);
    assert_eq!(rows[0].remaining_qty, 1.0);
}

// ==========================================
// 测试用例 3: 校验顺序 - 未领出配件最先被拒
// ==========================================

#[test]
fn test_part_not_issued_rejected_first() {
    let issued = vec![IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0)];
    let rows = installable(&issued, &[]);

    // 未领出的配件, 即使其他字段也不合法, 仍应返回 PartNotIssuedOrFullyInstalled
    let result = InstallableCalculator::validate_installation(
        &request("P9", None, -5.0),
        &rows,
    );
    assert!(matches!(
        result,
        Err(EngineError::PartNotIssuedOrFullyInstalled { part_id }) if part_id == "P9"
    ));
}

// ==========================================
// 测试用例 4: 存在待装序列化件时必须指定件号
// ==========================================

#[test]
fn test_serial_required() {
    let issued = vec![IssuedLine::serialized("ISS-1", "P2", "S1", 100.0)];
    let rows = installable(&issued, &[]);

    let result = InstallableCalculator::validate_installation(&request("P2", None, 1.0), &rows);
    assert!(matches!(result, Err(EngineError::SerialRequired { .. })));
}

// ==========================================
// 测试用例 5: 已装件号再次提交 → SerialAlreadyInstalled
// ==========================================

#[test]
fn test_serial_already_installed() {
    let issued = vec![
        IssuedLine::serialized("ISS-1", "P2", "S1", 100.0),
        IssuedLine::serialized("ISS-1", "P2", "S2", 100.0),
    ];
    let installs = vec![InstallationRecord::serialized("P2", "S1")];
    let rows = installable(&issued, &installs);

    let result =
        InstallableCalculator::validate_installation(&request("P2", Some("S1"), 1.0), &rows);
    assert!(matches!(
        result,
        Err(EngineError::SerialAlreadyInstalled { part_item_id, .. }) if part_item_id == "S1"
    ));
}

// ==========================================
// 测试用例 6: 序列化件数量 ≠ 1 → ValidationError
// ==========================================

#[test]
fn test_serialized_qty_not_one_rejected() {
    let issued = vec![IssuedLine::serialized("ISS-1", "P2", "S1", 100.0)];
    let rows = installable(&issued, &[]);

    let result =
        InstallableCalculator::validate_installation(&request("P2", Some("S1"), 2.0), &rows);
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

// ==========================================
// 测试用例 7: 序列化件合法提交 → 数量强制为 1
// ==========================================

#[test]
fn test_serialized_install_forces_qty_one() {
    let issued = vec![IssuedLine::serialized("ISS-1", "P2", "S1", 100.0)];
    let rows = installable(&issued, &[]);

    let qty = InstallableCalculator::validate_installation(&request("P2", Some("S1"), 1.0), &rows)
        .unwrap();
    assert_eq!(qty, 1.0);
}

// ==========================================
// 测试用例 8: 散装件超量 → QuantityExceedsRemaining
// ==========================================

#[test]
fn test_bulk_quantity_exceeds_remaining() {
    let issued = vec![IssuedLine::bulk("ISS-1", "P1", 3.0, 10.0)];
    let installs = vec![InstallationRecord::bulk("P1", 2.0)];
    let rows = installable(&issued, &installs);

    let result = InstallableCalculator::validate_installation(&request("P1", None, 2.0), &rows);
    assert!(matches!(
        result,
        Err(EngineError::QuantityExceedsRemaining { remaining, .. }) if (remaining - 1.0).abs() < 1e-9
    ));

    // 容差内的数量允许通过
    let ok = InstallableCalculator::validate_installation(&request("P1", None, 1.0003), &rows);
    assert!(ok.is_ok());
}

// ==========================================
// 测试用例 9: 负数里程表读数 → InvalidOdometer
// ==========================================

#[test]
fn test_negative_odometer_rejected() {
    let issued = vec![IssuedLine::bulk("ISS-1", "P1", 3.0, 10.0)];
    let rows = installable(&issued, &[]);

    let mut req = request("P1", None, 1.0);
    req.odometer_at_install = Some(-10.0);
    let result = InstallableCalculator::validate_installation(&req, &rows);
    assert!(matches!(
        result,
        Err(EngineError::InvalidOdometer { value }) if value == -10.0
    ));
}

// ==========================================
// 测试用例 10: 混合计量模式 - 散装余量与序列化件并存
// ==========================================

#[test]
fn test_mixed_mode_requires_serial_until_exhausted() {
    // 同一配件: 散装 2 + 序列化 1
    let issued = vec![
        IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0),
        IssuedLine::serialized("ISS-1", "P1", "S1", 10.0),
    ];
    let rows = installable(&issued, &[]);
    assert_eq!(rows[0].remaining_qty, 3.0);
    assert_eq!(rows[0].installable_serials, vec!["S1".to_string()]);

    // 存在待装序列化件时, 不带件号的散装提交被拒
    let result = InstallableCalculator::validate_installation(&request("P1", None, 1.0), &rows);
    assert!(matches!(result, Err(EngineError::SerialRequired { .. })));

    // 件号装完后, 散装提交恢复可用
    let installs = vec![InstallationRecord::serialized("P1", "S1")];
    let rows = installable(&issued, &installs);
    assert!(rows[0].installable_serials.is_empty());
    let qty = InstallableCalculator::validate_installation(&request("P1", None, 2.0), &rows).unwrap();
    assert_eq!(qty, 2.0);
}
