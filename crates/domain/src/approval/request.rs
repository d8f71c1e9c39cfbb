//! # 承認申請
//!
//! 休暇申請・持ち出し申請を共通のエンティティで表す。
//! 申請内容（[`RequestSubject`]）は承認処理では解釈せず、そのまま保持する。
//!
//! ## 楽観的ロック
//!
//! `version` は判断が永続化されるたびに 1 増える。
//! [`ApprovalRequest::apply`] は version を変更しない。永続化の直前に
//! ユースケースが [`ApprovalRequest::next_revision`] で更新する。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    config::ApprovalStageConfig,
    error::ApprovalError,
    projection::OverallStatus,
    stage::{Decision, RequestKind, StageIndex},
    status_vector::StatusVector,
};
use crate::{
    DomainError,
    value_objects::{EmployeeId, Version},
};

define_uuid_id! {
    /// 承認申請 ID
    pub struct ApprovalRequestId;
}

/// 申請内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestSubject {
    /// 休暇申請
    Leave {
        start_date: NaiveDate,
        end_date:   NaiveDate,
        reason:     String,
    },
    /// 持ち出し申請
    PackageOut {
        package_name:    String,
        package_details: String,
        date:            NaiveDate,
        time:            String,
        location:        String,
    },
}

impl RequestSubject {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Leave { .. } => RequestKind::Leave,
            Self::PackageOut { .. } => RequestKind::PackageOut,
        }
    }

    /// 入力値を検証し、前後の空白を除去した申請内容を返す
    ///
    /// # エラー
    ///
    /// - テキスト項目が空
    /// - 休暇の開始日が終了日より後
    pub fn validated(self) -> Result<Self, DomainError> {
        match self {
            Self::Leave {
                start_date,
                end_date,
                reason,
            } => {
                if start_date > end_date {
                    return Err(DomainError::Validation(format!(
                        "開始日（{start_date}）は終了日（{end_date}）以前である必要があります"
                    )));
                }
                Ok(Self::Leave {
                    start_date,
                    end_date,
                    reason: required_text("理由", reason)?,
                })
            }
            Self::PackageOut {
                package_name,
                package_details,
                date,
                time,
                location,
            } => Ok(Self::PackageOut {
                package_name: required_text("持ち出し品名", package_name)?,
                package_details: required_text("持ち出し品の詳細", package_details)?,
                date,
                time: required_text("時刻", time)?,
                location: required_text("持ち出し先", location)?,
            }),
        }
    }
}

fn required_text(label: &str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{label}は必須です")));
    }
    Ok(trimmed.to_string())
}

/// 承認申請エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    id: ApprovalRequestId,
    requester: EmployeeId,
    subject: RequestSubject,
    statuses: StatusVector,
    version: Version,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// 承認申請の新規作成パラメータ
pub struct NewApprovalRequest {
    pub id: ApprovalRequestId,
    pub requester: EmployeeId,
    pub subject: RequestSubject,
    pub now: DateTime<Utc>,
}

/// 承認申請の DB 復元パラメータ
pub struct ApprovalRequestRecord {
    pub id: ApprovalRequestId,
    pub requester: EmployeeId,
    pub subject: RequestSubject,
    pub statuses: Vec<i16>,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApprovalRequest {
    /// 新しい申請を作成する
    ///
    /// ステータスベクタは申請種別の設定に従い、全ステージ保留で始まる。
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: 申請内容が不正
    pub fn new(
        params: NewApprovalRequest,
        config: &ApprovalStageConfig,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: params.id,
            requester: params.requester,
            subject: params.subject.validated()?,
            statuses: StatusVector::all_pending(config.stage_count()),
            version: Version::initial(),
            created_at: params.now,
            updated_at: params.now,
        })
    }

    /// 既存のデータから復元する
    ///
    /// ステータスコードは検証しない。未知のコードを含む申請も表示はできるが、
    /// [`apply`](Self::apply) は `ApprovalError::InvalidVectorShape` で拒否する。
    pub fn from_db(record: ApprovalRequestRecord) -> Self {
        Self {
            id: record.id,
            requester: record.requester,
            subject: record.subject,
            statuses: StatusVector::from_codes(record.statuses),
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &ApprovalRequestId {
        &self.id
    }

    pub fn requester(&self) -> &EmployeeId {
        &self.requester
    }

    pub fn subject(&self) -> &RequestSubject {
        &self.subject
    }

    pub fn kind(&self) -> RequestKind {
        self.subject.kind()
    }

    pub fn statuses(&self) -> &StatusVector {
        &self.statuses
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn overall_status(&self) -> OverallStatus {
        self.statuses.overall_status()
    }

    // ビジネスロジック

    /// 指定ステージに判断を記録した申請を返す
    ///
    /// 変更されるのは対象ステージのステータスだけで、それ以外の項目は
    /// そのまま引き継ぐ。操作できない場合、元の申請は変更されない。
    ///
    /// # Errors
    ///
    /// - `ApprovalError::InvalidVectorShape`: ステータスベクタの長さが設定と不一致、
    ///   または未知のコードを含む
    /// - `ApprovalError::NotEligible`: このステージは今は操作できない
    pub fn apply(
        &self,
        config: &ApprovalStageConfig,
        stage: StageIndex,
        decision: Decision,
    ) -> Result<Self, ApprovalError> {
        config.check_eligibility(stage, &self.statuses)?;

        Ok(Self {
            statuses: self
                .statuses
                .with_stage(stage, decision.resulting_status()),
            ..self.clone()
        })
    }

    /// 操作者の役職から担当ステージを解決し、判断を記録する
    ///
    /// # Errors
    ///
    /// - `ApprovalError::NoApproverRole`: 役職に対応するステージがない
    /// - その他は [`apply`](Self::apply) と同じ
    pub fn decide(
        &self,
        config: &ApprovalStageConfig,
        acting: Option<&str>,
        decision: Decision,
    ) -> Result<(StageIndex, Self), ApprovalError> {
        let stage = config.resolve_acting_stage(acting).ok_or_else(|| {
            ApprovalError::NoApproverRole {
                position: acting.unwrap_or_default().to_string(),
            }
        })?;
        let decided = self.apply(config, stage, decision)?;
        Ok((stage, decided))
    }

    /// 永続化用にバージョンと更新日時を進めた申請を返す
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: バージョン番号が上限に達している
    pub fn next_revision(self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        Ok(Self {
            version: self.version.next()?,
            updated_at: now,
            ..self
        })
    }
}
