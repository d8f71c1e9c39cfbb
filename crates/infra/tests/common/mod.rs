//! テスト共通フィクスチャ
//!
//! リポジトリの統合テストで共通利用する申請生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use zenra_domain::{
    approval::{
        ApprovalRequest,
        ApprovalRequestId,
        ApprovalRequestRecord,
        ApprovalStageConfig,
        NewApprovalRequest,
        RequestSubject,
    },
    value_objects::EmployeeId,
};

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap()
}

pub fn employee(id: &str) -> EmployeeId {
    EmployeeId::new(id).unwrap()
}

/// 休暇申請を作成する（`offset_minutes` 分ずらした作成日時）
pub fn leave_request(requester: &str, offset_minutes: i64) -> ApprovalRequest {
    ApprovalRequest::new(
        NewApprovalRequest {
            id: ApprovalRequestId::new(),
            requester: employee(requester),
            subject: RequestSubject::Leave {
                start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                end_date:   NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
                reason:     "年次休暇".to_string(),
            },
            now: test_now() + Duration::minutes(offset_minutes),
        },
        &ApprovalStageConfig::leave(),
    )
    .unwrap()
}

/// 持ち出し申請を作成する
pub fn package_out_request(requester: &str) -> ApprovalRequest {
    ApprovalRequest::new(
        NewApprovalRequest {
            id: ApprovalRequestId::new(),
            requester: employee(requester),
            subject: RequestSubject::PackageOut {
                package_name:    "検査機器".to_string(),
                package_details: "校正のため外部業者へ".to_string(),
                date:            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                time:            "14:00".to_string(),
                location:        "第二工場".to_string(),
            },
            now: test_now(),
        },
        &ApprovalStageConfig::package_out(),
    )
    .unwrap()
}

/// ステータスコードだけを差し替えた申請（保存済みの不正データの再現用）
pub fn with_codes(request: &ApprovalRequest, codes: &[i16]) -> ApprovalRequest {
    ApprovalRequest::from_db(ApprovalRequestRecord {
        id: request.id().clone(),
        requester: request.requester().clone(),
        subject: request.subject().clone(),
        statuses: codes.to_vec(),
        version: request.version(),
        created_at: request.created_at(),
        updated_at: request.updated_at(),
    })
}
