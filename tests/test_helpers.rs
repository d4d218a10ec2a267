// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、仓储/API 构造等功能
// ==========================================

use fleet_parts_recon::api::{InstallationApi, WorkOrderApi, WorkOrderReportApi};
use fleet_parts_recon::db::open_sqlite_connection;
use fleet_parts_recon::repository::{
    init_schema, InstallationRepository, IssueRepository, QaResultRepository,
    SqliteWorkOrderRecords, WorkOrderRepository,
};
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 测试上下文: 共享连接上的全套仓储与 API
pub struct TestContext {
    // 临时数据库文件需保持存活
    pub _temp_file: NamedTempFile,
    pub db_path: String,
    pub conn: Arc<Mutex<Connection>>,
    pub work_order_repo: Arc<WorkOrderRepository>,
    pub issue_repo: Arc<IssueRepository>,
    pub installation_repo: Arc<InstallationRepository>,
    pub qa_repo: Arc<QaResultRepository>,
    pub work_order_api: WorkOrderApi,
    pub installation_api: InstallationApi,
    pub report_api: WorkOrderReportApi<SqliteWorkOrderRecords>,
}

/// 构建测试上下文（所有仓储共享同一连接）
pub fn setup() -> Result<TestContext, Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let conn = Arc::new(Mutex::new(open_sqlite_connection(&db_path)?));

    let work_order_repo = Arc::new(WorkOrderRepository::from_connection(Arc::clone(&conn)));
    let issue_repo = Arc::new(IssueRepository::from_connection(Arc::clone(&conn)));
    let installation_repo = Arc::new(InstallationRepository::from_connection(Arc::clone(&conn)));
    let qa_repo = Arc::new(QaResultRepository::from_connection(Arc::clone(&conn)));

    let work_order_api = WorkOrderApi::new(
        Arc::clone(&work_order_repo),
        Arc::clone(&issue_repo),
        Arc::clone(&installation_repo),
        Arc::clone(&qa_repo),
    );
    let installation_api = InstallationApi::new(
        Arc::clone(&work_order_repo),
        Arc::clone(&issue_repo),
        Arc::clone(&installation_repo),
    );
    let records = Arc::new(SqliteWorkOrderRecords::new(
        Arc::clone(&issue_repo),
        Arc::clone(&installation_repo),
        Arc::clone(&qa_repo),
    ));
    let report_api = WorkOrderReportApi::new(records);

    Ok(TestContext {
        _temp_file: temp_file,
        db_path,
        conn,
        work_order_repo,
        issue_repo,
        installation_repo,
        qa_repo,
        work_order_api,
        installation_api,
        report_api,
    })
}
