//! ApprovalRequestRepository: 承認申請の永続化
//!
//! 休暇申請・持ち出し申請を 1 テーブル（`approval_requests`）で管理する。
//! 申請内容は JSONB、ステータスベクタは `SMALLINT[]` で保存する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use zenra_domain::{
    approval::{
        ApprovalRequest,
        ApprovalRequestId,
        ApprovalRequestRecord,
        RequestKind,
        RequestSubject,
    },
    value_objects::{EmployeeId, Version},
};

use crate::error::InfraError;

/// ApprovalRequestRepository トレイト
#[async_trait]
pub trait ApprovalRequestRepository: Send + Sync {
    /// 新規申請を保存する
    async fn insert(&self, request: &ApprovalRequest) -> Result<(), InfraError>;

    /// 楽観的ロック付きで申請を更新する
    ///
    /// `expected_version` と保存済みのバージョンが一致する場合のみ、
    /// ステータスベクタ・バージョン・更新日時を置き換える。
    /// 不一致（または申請が存在しない）場合は `InfraErrorKind::Conflict` を返す。
    async fn update_with_version_check(
        &self,
        request: &ApprovalRequest,
        expected_version: Version,
    ) -> Result<(), InfraError>;

    /// ID で申請を検索する
    async fn find_by_id(&self, id: &ApprovalRequestId)
    -> Result<Option<ApprovalRequest>, InfraError>;

    /// 種別ごとの申請一覧を取得する（新しい順）
    async fn find_by_kind(&self, kind: RequestKind) -> Result<Vec<ApprovalRequest>, InfraError>;

    /// 申請者ごとの申請一覧を取得する（新しい順）
    async fn find_by_requester(
        &self,
        kind: RequestKind,
        requester: &EmployeeId,
    ) -> Result<Vec<ApprovalRequest>, InfraError>;

    /// 申請を削除する
    ///
    /// 削除した場合は `true`、存在しなかった場合は `false` を返す。
    async fn delete(&self, id: &ApprovalRequestId) -> Result<bool, InfraError>;
}

/// `approval_requests` テーブルの行
#[derive(sqlx::FromRow)]
struct ApprovalRequestRow {
    id:           Uuid,
    requester_id: String,
    subject:      serde_json::Value,
    statuses:     Vec<i16>,
    version:      i32,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TryFrom<ApprovalRequestRow> for ApprovalRequest {
    type Error = InfraError;

    fn try_from(row: ApprovalRequestRow) -> Result<Self, Self::Error> {
        let subject: RequestSubject = serde_json::from_value(row.subject)?;
        let requester = EmployeeId::new(row.requester_id)
            .map_err(|e| InfraError::invalid_record(e.to_string()))?;
        let version =
            Version::try_from(row.version).map_err(|e| InfraError::invalid_record(e.to_string()))?;

        Ok(ApprovalRequest::from_db(ApprovalRequestRecord {
            id: ApprovalRequestId::from_uuid(row.id),
            requester,
            subject,
            statuses: row.statuses,
            version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

fn version_column(version: Version) -> Result<i32, InfraError> {
    version
        .as_i32()
        .map_err(|e| InfraError::unexpected(e.to_string()))
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, requester_id, subject, statuses, version, created_at, updated_at
    FROM approval_requests
"#;

/// PostgreSQL 実装
#[derive(Debug, Clone)]
pub struct PostgresApprovalRequestRepository {
    pool: PgPool,
}

impl PostgresApprovalRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalRequestRepository for PostgresApprovalRequestRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %request.id()))]
    async fn insert(&self, request: &ApprovalRequest) -> Result<(), InfraError> {
        let kind: &str = request.kind().into();
        let subject = serde_json::to_value(request.subject())?;

        sqlx::query(
            r#"
            INSERT INTO approval_requests (
                id, kind, requester_id, subject, statuses, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(request.id().as_uuid())
        .bind(kind)
        .bind(request.requester().as_str())
        .bind(subject)
        .bind(request.statuses().codes())
        .bind(version_column(request.version())?)
        .bind(request.created_at())
        .bind(request.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(id = %request.id(), %expected_version)
    )]
    async fn update_with_version_check(
        &self,
        request: &ApprovalRequest,
        expected_version: Version,
    ) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE approval_requests SET
                statuses = $1,
                version = $2,
                updated_at = $3
            WHERE id = $4 AND version = $5
            "#,
        )
        .bind(request.statuses().codes())
        .bind(version_column(request.version())?)
        .bind(request.updated_at())
        .bind(request.id().as_uuid())
        .bind(version_column(expected_version)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(InfraError::conflict(
                "ApprovalRequest",
                request.id().to_string(),
            ));
        }

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        id: &ApprovalRequestId,
    ) -> Result<Option<ApprovalRequest>, InfraError> {
        let row = sqlx::query_as::<_, ApprovalRequestRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ApprovalRequest::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%kind))]
    async fn find_by_kind(&self, kind: RequestKind) -> Result<Vec<ApprovalRequest>, InfraError> {
        let kind: &str = kind.into();
        let rows = sqlx::query_as::<_, ApprovalRequestRow>(&format!(
            "{SELECT_COLUMNS} WHERE kind = $1 ORDER BY created_at DESC"
        ))
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ApprovalRequest::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%kind, %requester))]
    async fn find_by_requester(
        &self,
        kind: RequestKind,
        requester: &EmployeeId,
    ) -> Result<Vec<ApprovalRequest>, InfraError> {
        let kind: &str = kind.into();
        let rows = sqlx::query_as::<_, ApprovalRequestRow>(&format!(
            "{SELECT_COLUMNS} WHERE kind = $1 AND requester_id = $2 ORDER BY created_at DESC"
        ))
        .bind(kind)
        .bind(requester.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ApprovalRequest::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &ApprovalRequestId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM approval_requests WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
