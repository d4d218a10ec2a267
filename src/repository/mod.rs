// ==========================================
// 车队维保配件对账系统 - 数据仓储层
// ==========================================
// 职责: SQLite 数据访问
// 红线: Repository 不含业务逻辑; 安装写入仓储仅提供
//       读取-校验-写入的原子事务边界, 校验本身委托引擎层
// ==========================================

pub mod error;
pub mod installation_repo;
pub mod issue_repo;
pub mod qa_repo;
pub mod records;
pub mod schema;
pub mod work_order_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use installation_repo::InstallationRepository;
pub use issue_repo::IssueRepository;
pub use qa_repo::QaResultRepository;
pub use records::SqliteWorkOrderRecords;
pub use schema::init_schema;
pub use work_order_repo::WorkOrderRepository;
