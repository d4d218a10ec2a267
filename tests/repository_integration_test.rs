// ==========================================
// 仓储层集成测试
// ==========================================
// 测试目标: 验证 SQLite 仓储 CRUD 与安装写入的原子校验边界
// 覆盖范围: 工单/领料行/安装记录/质检结果 + 序列化件唯一索引
// ==========================================

mod test_helpers;

use fleet_parts_recon::domain::parts::{InstallationRecord, IssuedLine};
use fleet_parts_recon::domain::report::InstallationRequest;
use fleet_parts_recon::domain::types::{QaResult, WorkOrderStatus};
use fleet_parts_recon::domain::work_order::WorkOrder;
use fleet_parts_recon::engine::error::EngineError;
use fleet_parts_recon::repository::{InstallationRepository, RepositoryError};
use test_helpers::setup;

fn bulk_request(part_id: &str, qty: f64) -> InstallationRequest {
    InstallationRequest {
        part_id: part_id.to_string(),
        part_item_id: None,
        qty_installed: qty,
        odometer_at_install: None,
        notes: None,
    }
}

// ==========================================
// 测试用例 1: 工单 CRUD 往返
// ==========================================

#[test]
fn test_work_order_roundtrip() {
    let ctx = setup().unwrap();

    let wo = WorkOrder::new("WO-1", "VH-1");
    ctx.work_order_repo.insert(&wo).unwrap();

    let loaded = ctx.work_order_repo.get("WO-1").unwrap();
    assert_eq!(loaded.work_order_id, "WO-1");
    assert_eq!(loaded.vehicle_id, "VH-1");
    assert_eq!(loaded.status, WorkOrderStatus::Open);
    assert!(loaded.completed_at.is_none());

    ctx.work_order_repo
        .update_status("WO-1", WorkOrderStatus::InProgress)
        .unwrap();
    assert_eq!(
        ctx.work_order_repo.get("WO-1").unwrap().status,
        WorkOrderStatus::InProgress
    );
}

// ==========================================
// 测试用例 2: 不存在的工单 → NotFound
// ==========================================

#[test]
fn test_missing_work_order_not_found() {
    let ctx = setup().unwrap();
    let result = ctx.work_order_repo.get("WO-MISSING");
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

// ==========================================
// 测试用例 3: 领料行追加与按序读取
// ==========================================

#[test]
fn test_issued_lines_append_only_ordered() {
    let ctx = setup().unwrap();
    ctx.work_order_repo
        .insert(&WorkOrder::new("WO-1", "VH-1"))
        .unwrap();

    ctx.issue_repo
        .insert("WO-1", &IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0))
        .unwrap();
    ctx.issue_repo
        .insert("WO-1", &IssuedLine::serialized("ISS-1", "P2", "S1", 100.0))
        .unwrap();

    let lines = ctx.issue_repo.list_by_work_order("WO-1").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].part_id, "P1");
    assert_eq!(lines[1].part_item_id.as_deref(), Some("S1"));

    // 其他工单互不可见
    assert!(ctx.issue_repo.list_by_work_order("WO-2").unwrap().is_empty());
}

// ==========================================
// 测试用例 4: 安装写入事务内重校验, 拒绝不落库
// ==========================================

#[test]
fn test_insert_validated_rejects_without_partial_write() {
    let ctx = setup().unwrap();
    ctx.work_order_repo
        .insert(&WorkOrder::new("WO-1", "VH-1"))
        .unwrap();
    ctx.issue_repo
        .insert("WO-1", &IssuedLine::bulk("ISS-1", "P1", 2.0, 10.0))
        .unwrap();

    // 超量提交被拒
    let result = ctx
        .installation_repo
        .insert_validated("WO-1", &bulk_request("P1", 3.0));
    assert!(matches!(
        result,
        Err(RepositoryError::InstallationRejected(
            EngineError::QuantityExceedsRemaining { .. }
        ))
    ));

    // 拒绝后无任何记录落库
    assert!(ctx
        .installation_repo
        .list_by_work_order("WO-1")
        .unwrap()
        .is_empty());

    // 合法提交成功
    let record = ctx
        .installation_repo
        .insert_validated("WO-1", &bulk_request("P1", 2.0))
        .unwrap();
    assert_eq!(record.qty_installed, 2.0);
    assert_eq!(
        ctx.installation_repo.list_by_work_order("WO-1").unwrap().len(),
        1
    );
}

// ==========================================
// 测试用例 5: 序列化件唯一索引在写入边界兜底
// ==========================================

#[test]
fn test_serial_unique_index_enforced_at_db() {
    let ctx = setup().unwrap();
    ctx.work_order_repo
        .insert(&WorkOrder::new("WO-1", "VH-1"))
        .unwrap();

    // 绕过引擎校验, 用两个独立连接直接写入同一件号
    let repo_a = InstallationRepository::new(&ctx.db_path).unwrap();
    let repo_b = InstallationRepository::new(&ctx.db_path).unwrap();

    repo_a
        .insert_unchecked("WO-1", &InstallationRecord::serialized("P2", "S1"))
        .unwrap();
    let second = repo_b.insert_unchecked("WO-1", &InstallationRecord::serialized("P2", "S1"));
    assert!(matches!(
        second,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}

// ==========================================
// 测试用例 6: 质检结果覆盖写
// ==========================================

#[test]
fn test_qa_result_upsert() {
    let ctx = setup().unwrap();
    ctx.work_order_repo
        .insert(&WorkOrder::new("WO-1", "VH-1"))
        .unwrap();

    assert_eq!(ctx.qa_repo.get_result("WO-1").unwrap(), None);

    ctx.qa_repo
        .set_result("WO-1", QaResult::Fail, "qa-01")
        .unwrap();
    assert_eq!(ctx.qa_repo.get_result("WO-1").unwrap(), Some(QaResult::Fail));

    // 复检覆盖写
    ctx.qa_repo
        .set_result("WO-1", QaResult::Pass, "qa-01")
        .unwrap();
    assert_eq!(ctx.qa_repo.get_result("WO-1").unwrap(), Some(QaResult::Pass));
}

// ==========================================
// 测试用例 7: 并发完工防护（mark_completed 带终态条件）
// ==========================================

#[test]
fn test_mark_completed_terminal_guard() {
    let ctx = setup().unwrap();
    let mut wo = WorkOrder::new("WO-1", "VH-1");
    ctx.work_order_repo.insert(&wo).unwrap();

    wo.status = WorkOrderStatus::Completed;
    wo.completed_at = Some(chrono::Utc::now());
    wo.completed_by = Some("sup-01".to_string());

    ctx.work_order_repo.mark_completed(&wo).unwrap();
    assert_eq!(
        ctx.work_order_repo.get("WO-1").unwrap().status,
        WorkOrderStatus::Completed
    );

    // 第二次提交命中终态防护
    let second = ctx.work_order_repo.mark_completed(&wo);
    assert!(matches!(
        second,
        Err(RepositoryError::InvalidStateTransition { .. })
    ));
}
