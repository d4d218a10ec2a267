// ==========================================
// 车队维保配件对账系统 - 记录读取接口实现
// ==========================================
// 职责: 以 SQLite 仓储实现引擎层的 WorkOrderRecords 读取接口
// ==========================================

use crate::domain::parts::{InstallationRecord, IssuedLine};
use crate::domain::types::QaResult;
use crate::engine::report::WorkOrderRecords;
use crate::repository::installation_repo::InstallationRepository;
use crate::repository::issue_repo::IssueRepository;
use crate::repository::qa_repo::QaResultRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// WorkOrderRecords 的 SQLite 实现
///
/// 三个仓储共享同一连接（Arc<Mutex<Connection>>）,
/// 读取天然与安装写入事务串行。
pub struct SqliteWorkOrderRecords {
    issue_repo: Arc<IssueRepository>,
    installation_repo: Arc<InstallationRepository>,
    qa_repo: Arc<QaResultRepository>,
}

impl SqliteWorkOrderRecords {
    /// 创建新的 SqliteWorkOrderRecords 实例
    pub fn new(
        issue_repo: Arc<IssueRepository>,
        installation_repo: Arc<InstallationRepository>,
        qa_repo: Arc<QaResultRepository>,
    ) -> Self {
        Self {
            issue_repo,
            installation_repo,
            qa_repo,
        }
    }
}

#[async_trait]
impl WorkOrderRecords for SqliteWorkOrderRecords {
    async fn fetch_issued_lines(&self, work_order_id: &str) -> anyhow::Result<Vec<IssuedLine>> {
        Ok(self.issue_repo.list_by_work_order(work_order_id)?)
    }

    async fn fetch_installations(
        &self,
        work_order_id: &str,
    ) -> anyhow::Result<Vec<InstallationRecord>> {
        Ok(self.installation_repo.list_by_work_order(work_order_id)?)
    }

    async fn fetch_qa_result(&self, work_order_id: &str) -> anyhow::Result<Option<QaResult>> {
        Ok(self.qa_repo.get_result(work_order_id)?)
    }
}
