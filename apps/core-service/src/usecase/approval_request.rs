//! # 承認申請ユースケース
//!
//! 休暇申請・持ち出し申請の作成・取得・承認/却下・削除を実装する。
//!
//! 承認/却下の処理フロー:
//!
//! 1. 申請を取得（種別が一致しない場合は NotFound）
//! 2. クライアントの version と比較（早期フェイル）
//! 3. 操作者の役職から担当ステージを解決し、状態機械で判断を記録
//! 4. version を進めて楽観的ロック付きで保存

use std::sync::Arc;

use zenra_domain::{
    approval::{
        ApprovalRequest,
        ApprovalRequestId,
        ApprovalStageConfig,
        ApprovalStageTable,
        Decision,
        NewApprovalRequest,
        RequestKind,
        RequestSubject,
    },
    clock::Clock,
    value_objects::{EmployeeId, Version},
};
use zenra_infra::repository::ApprovalRequestRepository;
use zenra_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::helpers::{FindResultExt, save_error},
};

/// 申請作成入力
#[derive(Debug, Clone)]
pub struct CreateRequestInput {
    /// 申請者の従業員 ID
    pub requester: String,
    /// 申請内容
    pub subject:   RequestSubject,
}

/// 承認/却下入力
#[derive(Debug, Clone)]
pub struct DecideInput {
    pub decision:        Decision,
    /// 操作者の役職。`None` は管理コンソール（人事）からの操作
    pub acting_position: Option<String>,
    /// 楽観的ロック用バージョン
    pub version:         Version,
}

/// 承認申請ユースケース実装
pub struct ApprovalRequestUseCaseImpl {
    repo:   Arc<dyn ApprovalRequestRepository>,
    stages: ApprovalStageTable,
    clock:  Arc<dyn Clock>,
}

impl ApprovalRequestUseCaseImpl {
    pub fn new(
        repo: Arc<dyn ApprovalRequestRepository>,
        stages: ApprovalStageTable,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            stages,
            clock,
        }
    }

    /// 申請種別の承認ステージ設定
    pub fn stage_config(&self, kind: RequestKind) -> &ApprovalStageConfig {
        self.stages.for_kind(kind)
    }

    /// 申請を作成する
    ///
    /// ステータスは種別の設定に従い全ステージ保留で始まる。
    pub async fn create_request(
        &self,
        kind: RequestKind,
        input: CreateRequestInput,
    ) -> Result<ApprovalRequest, CoreError> {
        if input.subject.kind() != kind {
            return Err(CoreError::BadRequest(format!(
                "申請内容の種別（{}）がパスの種別（{kind}）と一致しません",
                input.subject.kind()
            )));
        }

        let requester =
            EmployeeId::new(input.requester).map_err(|e| CoreError::BadRequest(e.to_string()))?;
        let request = ApprovalRequest::new(
            NewApprovalRequest {
                id: ApprovalRequestId::new(),
                requester,
                subject: input.subject,
                now: self.clock.now(),
            },
            self.stages.for_kind(kind),
        )
        .map_err(|e| CoreError::BadRequest(e.to_string()))?;

        self.repo.insert(&request).await?;

        log_business_event!(
            event.category = event::category::APPROVAL,
            event.action = event::action::REQUEST_CREATED,
            event.entity_type = entity_type(kind),
            event.entity_id = %request.id(),
            event.actor = %request.requester(),
            event.result = event::result::SUCCESS,
            "申請を作成"
        );

        Ok(request)
    }

    /// 種別ごとの申請一覧を取得する
    pub async fn list_requests(
        &self,
        kind: RequestKind,
    ) -> Result<Vec<ApprovalRequest>, CoreError> {
        Ok(self.repo.find_by_kind(kind).await?)
    }

    /// 申請者ごとの申請一覧を取得する
    pub async fn list_requests_by_requester(
        &self,
        kind: RequestKind,
        requester: String,
    ) -> Result<Vec<ApprovalRequest>, CoreError> {
        let requester =
            EmployeeId::new(requester).map_err(|e| CoreError::BadRequest(e.to_string()))?;
        Ok(self.repo.find_by_requester(kind, &requester).await?)
    }

    /// 申請を 1 件取得する
    pub async fn get_request(
        &self,
        kind: RequestKind,
        id: ApprovalRequestId,
    ) -> Result<ApprovalRequest, CoreError> {
        let request = self.repo.find_by_id(&id).await.or_not_found("申請")?;
        if request.kind() != kind {
            return Err(CoreError::NotFound("申請が見つかりません".to_string()));
        }
        Ok(request)
    }

    /// 操作者の担当ステージに承認/却下を記録する
    pub async fn decide(
        &self,
        kind: RequestKind,
        id: ApprovalRequestId,
        input: DecideInput,
    ) -> Result<ApprovalRequest, CoreError> {
        // 1. 申請を取得
        let request = self.get_request(kind, id).await?;

        // 2. 楽観的ロック（バージョン一致チェック、早期フェイル）
        if request.version() != input.version {
            return Err(CoreError::Conflict(
                "申請は既に更新されています。最新の情報を取得してください。".to_string(),
            ));
        }

        // 3. 状態遷移
        let acting = input.acting_position.as_deref();
        let actor = acting.unwrap_or("administrative");
        let config = self.stages.for_kind(kind);
        let (stage, decided) = match request.decide(config, acting, input.decision) {
            Ok(decided) => decided,
            Err(e) => {
                log_business_event!(
                    event.category = event::category::APPROVAL,
                    event.action = decision_action(input.decision),
                    event.entity_type = entity_type(kind),
                    event.entity_id = %request.id(),
                    event.actor = actor,
                    event.result = event::result::FAILURE,
                    reason = %e,
                    "承認ステージを操作できません"
                );
                return Err(e.into());
            }
        };

        // 4. 保存
        let expected_version = request.version();
        let updated = decided
            .next_revision(self.clock.now())
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        self.repo
            .update_with_version_check(&updated, expected_version)
            .await
            .map_err(save_error)?;

        log_business_event!(
            event.category = event::category::APPROVAL,
            event.action = decision_action(input.decision),
            event.entity_type = entity_type(kind),
            event.entity_id = %updated.id(),
            event.actor = actor,
            event.result = event::result::SUCCESS,
            stage = stage.get(),
            status = %updated.overall_status(),
            "承認ステージを更新"
        );

        Ok(updated)
    }

    /// 申請を削除する
    ///
    /// 承認状態に関係なく削除できる。
    pub async fn delete_request(
        &self,
        kind: RequestKind,
        id: ApprovalRequestId,
    ) -> Result<(), CoreError> {
        let request = self.get_request(kind, id).await?;

        if !self.repo.delete(request.id()).await? {
            return Err(CoreError::NotFound("申請が見つかりません".to_string()));
        }

        log_business_event!(
            event.category = event::category::APPROVAL,
            event.action = event::action::REQUEST_DELETED,
            event.entity_type = entity_type(kind),
            event.entity_id = %request.id(),
            event.result = event::result::SUCCESS,
            "申請を削除"
        );

        Ok(())
    }
}

fn entity_type(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => event::entity_type::LEAVE_REQUEST,
        RequestKind::PackageOut => event::entity_type::PACKAGE_OUT_REQUEST,
    }
}

fn decision_action(decision: Decision) -> &'static str {
    match decision {
        Decision::Accept => event::action::STAGE_ACCEPTED,
        Decision::Reject => event::action::STAGE_REJECTED,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use zenra_domain::{approval::OverallStatus, clock::FixedClock};
    use zenra_infra::repository::InMemoryApprovalRequestRepository;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_735_689_600, 0).unwrap()
    }

    #[fixture]
    fn sut() -> ApprovalRequestUseCaseImpl {
        ApprovalRequestUseCaseImpl::new(
            Arc::new(InMemoryApprovalRequestRepository::new()),
            ApprovalStageTable::default(),
            Arc::new(FixedClock::new(now())),
        )
    }

    fn package_out_input(requester: &str) -> CreateRequestInput {
        CreateRequestInput {
            requester: requester.to_string(),
            subject:   RequestSubject::PackageOut {
                package_name:    "ノート PC".to_string(),
                package_details: "出張用".to_string(),
                date:            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                time:            "09:00".to_string(),
                location:        "大阪支社".to_string(),
            },
        }
    }

    fn leave_input(requester: &str) -> CreateRequestInput {
        CreateRequestInput {
            requester: requester.to_string(),
            subject:   RequestSubject::Leave {
                start_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
                end_date:   NaiveDate::from_ymd_opt(2025, 2, 12).unwrap(),
                reason:     "私用".to_string(),
            },
        }
    }

    fn decide_input(decision: Decision, acting: Option<&str>, version: Version) -> DecideInput {
        DecideInput {
            decision,
            acting_position: acting.map(str::to_string),
            version,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_申請を作成すると全ステージ保留で保存される(sut: ApprovalRequestUseCaseImpl) {
        let created = sut
            .create_request(RequestKind::PackageOut, package_out_input("emp-001"))
            .await
            .unwrap();

        let found = sut
            .get_request(RequestKind::PackageOut, created.id().clone())
            .await
            .unwrap();
        assert_eq!(found.statuses().codes(), vec![1, 1, 1, 1]);
        assert_eq!(found.created_at(), now());
    }

    #[rstest]
    #[tokio::test]
    async fn test_パスと申請内容の種別が異なる場合はbad_request(sut: ApprovalRequestUseCaseImpl) {
        let result = sut
            .create_request(RequestKind::Leave, package_out_input("emp-001"))
            .await;

        assert!(matches!(result, Err(CoreError::BadRequest(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_空の申請者はbad_request(sut: ApprovalRequestUseCaseImpl) {
        let result = sut
            .create_request(RequestKind::Leave, leave_input("  "))
            .await;

        assert!(matches!(result, Err(CoreError::BadRequest(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_別の種別のidで取得するとnot_found(sut: ApprovalRequestUseCaseImpl) {
        let created = sut
            .create_request(RequestKind::Leave, leave_input("emp-001"))
            .await
            .unwrap();

        let result = sut
            .get_request(RequestKind::PackageOut, created.id().clone())
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_持ち出し申請の承認から却下までの流れ(sut: ApprovalRequestUseCaseImpl) {
        let kind = RequestKind::PackageOut;
        let created = sut
            .create_request(kind, package_out_input("emp-001"))
            .await
            .unwrap();
        let id = created.id().clone();

        let r = sut
            .decide(kind, id.clone(), decide_input(Decision::Accept, None, created.version()))
            .await
            .unwrap();
        assert_eq!(r.statuses().codes(), vec![2, 1, 1, 1]);

        let r = sut
            .decide(
                kind,
                id.clone(),
                decide_input(Decision::Accept, Some("General Manager"), r.version()),
            )
            .await
            .unwrap();
        assert_eq!(r.statuses().codes(), vec![2, 2, 1, 1]);

        let r = sut
            .decide(
                kind,
                id.clone(),
                decide_input(Decision::Reject, Some("Factory Manager"), r.version()),
            )
            .await
            .unwrap();
        assert_eq!(r.statuses().codes(), vec![2, 2, 3, 1]);
        assert_eq!(r.overall_status(), OverallStatus::Rejected);
        assert_eq!(r.version().as_u32(), 4);

        let result = sut
            .decide(
                kind,
                id.clone(),
                decide_input(Decision::Accept, Some("LSO Officer"), r.version()),
            )
            .await;
        assert!(matches!(result, Err(CoreError::NotEligible(_))));

        let stored = sut.get_request(kind, id).await.unwrap();
        assert_eq!(stored, r);
    }

    #[rstest]
    #[tokio::test]
    async fn test_古いバージョンでの判断はconflict(sut: ApprovalRequestUseCaseImpl) {
        let kind = RequestKind::Leave;
        let created = sut.create_request(kind, leave_input("emp-001")).await.unwrap();
        sut.decide(
            kind,
            created.id().clone(),
            decide_input(Decision::Accept, None, created.version()),
        )
        .await
        .unwrap();

        let result = sut
            .decide(
                kind,
                created.id().clone(),
                decide_input(Decision::Reject, None, created.version()),
            )
            .await;

        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_承認権限のない役職はforbidden(sut: ApprovalRequestUseCaseImpl) {
        let kind = RequestKind::Leave;
        let created = sut.create_request(kind, leave_input("emp-001")).await.unwrap();

        let result = sut
            .decide(
                kind,
                created.id().clone(),
                decide_input(Decision::Accept, Some("LSO Officer"), created.version()),
            )
            .await;

        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_申請者ごとの一覧と削除(sut: ApprovalRequestUseCaseImpl) {
        let kind = RequestKind::Leave;
        let mine = sut.create_request(kind, leave_input("emp-001")).await.unwrap();
        sut.create_request(kind, leave_input("emp-002")).await.unwrap();

        let listed = sut
            .list_requests_by_requester(kind, "emp-001".to_string())
            .await
            .unwrap();
        assert_eq!(listed, vec![mine.clone()]);
        assert_eq!(sut.list_requests(kind).await.unwrap().len(), 2);

        sut.delete_request(kind, mine.id().clone()).await.unwrap();

        let result = sut.get_request(kind, mine.id().clone()).await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
