//! # インメモリ実装
//!
//! `STORE_BACKEND=memory` で使う実装。ユースケーステストでもそのまま使う。
//! 読み込み・比較・書き込みを 1 回のロック内で行うため、
//! バージョン確認と更新の間に他の書き込みが割り込むことはない。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use zenra_domain::{
    approval::{ApprovalRequest, ApprovalRequestId, RequestKind},
    value_objects::{EmployeeId, Version},
};

use super::ApprovalRequestRepository;
use crate::error::InfraError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryApprovalRequestRepository {
    requests: Arc<Mutex<Vec<ApprovalRequest>>>,
}

impl InMemoryApprovalRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, predicate: impl Fn(&ApprovalRequest) -> bool) -> Vec<ApprovalRequest> {
        let requests = self.requests.lock().await;
        let mut found: Vec<_> = requests.iter().filter(|r| predicate(r)).cloned().collect();
        // 新しい順。作成日時が同じ場合は後から保存したものを先にする
        found.reverse();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        found
    }
}

#[async_trait]
impl ApprovalRequestRepository for InMemoryApprovalRequestRepository {
    async fn insert(&self, request: &ApprovalRequest) -> Result<(), InfraError> {
        let mut requests = self.requests.lock().await;
        if requests.iter().any(|r| r.id() == request.id()) {
            return Err(InfraError::conflict(
                "ApprovalRequest",
                request.id().to_string(),
            ));
        }
        requests.push(request.clone());
        Ok(())
    }

    async fn update_with_version_check(
        &self,
        request: &ApprovalRequest,
        expected_version: Version,
    ) -> Result<(), InfraError> {
        let mut requests = self.requests.lock().await;
        let Some(stored) = requests
            .iter_mut()
            .find(|r| r.id() == request.id() && r.version() == expected_version)
        else {
            return Err(InfraError::conflict(
                "ApprovalRequest",
                request.id().to_string(),
            ));
        };
        *stored = request.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ApprovalRequestId,
    ) -> Result<Option<ApprovalRequest>, InfraError> {
        let requests = self.requests.lock().await;
        Ok(requests.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_kind(&self, kind: RequestKind) -> Result<Vec<ApprovalRequest>, InfraError> {
        Ok(self.filtered(|r| r.kind() == kind).await)
    }

    async fn find_by_requester(
        &self,
        kind: RequestKind,
        requester: &EmployeeId,
    ) -> Result<Vec<ApprovalRequest>, InfraError> {
        Ok(self
            .filtered(|r| r.kind() == kind && r.requester() == requester)
            .await)
    }

    async fn delete(&self, id: &ApprovalRequestId) -> Result<bool, InfraError> {
        let mut requests = self.requests.lock().await;
        let before = requests.len();
        requests.retain(|r| r.id() != id);
        Ok(requests.len() < before)
    }
}
