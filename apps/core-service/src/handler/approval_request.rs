//! # 承認申請ハンドラ
//!
//! 休暇申請・持ち出し申請の内部 API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /internal/{kind}` - 申請作成
//! - `GET /internal/{kind}` - 種別ごとの申請一覧
//! - `GET /internal/{kind}/employee/{employee_id}` - 申請者ごとの申請一覧
//! - `GET /internal/{kind}/{id}` - 申請詳細
//! - `POST /internal/{kind}/{id}/decision` - 承認/却下
//! - `DELETE /internal/{kind}/{id}` - 申請削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;
use zenra_domain::{
    approval::{
        ApprovalRequest,
        ApprovalRequestId,
        ApprovalStageConfig,
        Decision,
        OverallStatus,
        RequestKind,
        RequestSubject,
    },
    value_objects::Version,
};
use zenra_shared::ApiResponse;

use crate::{
    error::CoreError,
    usecase::{ApprovalRequestUseCaseImpl, CreateRequestInput, DecideInput},
};

/// 承認申請 API の共有状態
pub struct ApprovalRequestState {
    pub usecase: ApprovalRequestUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 休暇申請作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateLeaveRequest {
    pub employee_id: String,
    pub start_date:  NaiveDate,
    pub end_date:    NaiveDate,
    pub reason:      String,
}

/// 持ち出し申請作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreatePackageOutRequest {
    pub employee_id:     String,
    pub package_name:    String,
    pub package_details: String,
    pub date:            NaiveDate,
    pub time:            String,
    pub location:        String,
}

/// 承認/却下リクエスト
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision:        Decision,
    /// 操作者の役職。`null` は管理コンソール（人事）
    #[serde(default)]
    pub acting_position: Option<String>,
    pub version:         i32,
}

/// ステージ別ステータス DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct StageStatusDto {
    pub label:  String,
    pub status: OverallStatus,
}

/// 承認申請 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct ApprovalRequestDto {
    pub id:             Uuid,
    pub employee_id:    String,
    #[serde(flatten)]
    pub subject:        RequestSubject,
    pub statuses:       Vec<i16>,
    pub stage_statuses: Vec<StageStatusDto>,
    pub status:         OverallStatus,
    pub version:        u32,
    pub created_at:     DateTime<Utc>,
    pub updated_at:     DateTime<Utc>,
}

impl ApprovalRequestDto {
    fn from_request(request: &ApprovalRequest, config: &ApprovalStageConfig) -> Self {
        Self {
            id:             *request.id().as_uuid(),
            employee_id:    request.requester().to_string(),
            subject:        request.subject().clone(),
            statuses:       request.statuses().codes(),
            stage_statuses: request
                .statuses()
                .stage_labels(config.roles())
                .into_iter()
                .map(|(label, status)| StageStatusDto { label, status })
                .collect(),
            status:         request.overall_status(),
            version:        request.version().as_u32(),
            created_at:     request.created_at(),
            updated_at:     request.updated_at(),
        }
    }
}

// --- パス解釈 ---

/// パスの `{kind}` セグメントを申請種別に変換する
///
/// 未知の種別はルートが存在しないものとして扱う。
fn parse_kind(segment: &str) -> Result<RequestKind, CoreError> {
    match segment {
        "leave-requests" => Ok(RequestKind::Leave),
        "package-out-requests" => Ok(RequestKind::PackageOut),
        other => Err(CoreError::NotFound(format!("申請種別 {other}"))),
    }
}

fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(body).map_err(|e| CoreError::BadRequest(e.to_string()))
}

fn to_dto(state: &ApprovalRequestState, request: &ApprovalRequest) -> ApprovalRequestDto {
    ApprovalRequestDto::from_request(request, state.usecase.stage_config(request.kind()))
}

// --- ハンドラ ---

/// POST /internal/{kind}
///
/// 申請を作成する。全ステージ保留で保存される。
pub async fn create_request(
    State(state): State<Arc<ApprovalRequestState>>,
    Path(kind): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, CoreError> {
    let kind = parse_kind(&kind)?;

    let input = match kind {
        RequestKind::Leave => {
            let req: CreateLeaveRequest = parse_body(body)?;
            CreateRequestInput {
                requester: req.employee_id,
                subject:   RequestSubject::Leave {
                    start_date: req.start_date,
                    end_date:   req.end_date,
                    reason:     req.reason,
                },
            }
        }
        RequestKind::PackageOut => {
            let req: CreatePackageOutRequest = parse_body(body)?;
            CreateRequestInput {
                requester: req.employee_id,
                subject:   RequestSubject::PackageOut {
                    package_name:    req.package_name,
                    package_details: req.package_details,
                    date:            req.date,
                    time:            req.time,
                    location:        req.location,
                },
            }
        }
    };

    let request = state.usecase.create_request(kind, input).await?;

    let response = ApiResponse::new(to_dto(&state, &request));
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /internal/{kind}
///
/// 種別ごとの申請一覧を新しい順で返す。
pub async fn list_requests(
    State(state): State<Arc<ApprovalRequestState>>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let kind = parse_kind(&kind)?;

    let requests = state.usecase.list_requests(kind).await?;

    let items: Vec<_> = requests.iter().map(|r| to_dto(&state, r)).collect();
    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// GET /internal/{kind}/employee/{employee_id}
pub async fn list_requests_by_employee(
    State(state): State<Arc<ApprovalRequestState>>,
    Path((kind, employee_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, CoreError> {
    let kind = parse_kind(&kind)?;

    let requests = state
        .usecase
        .list_requests_by_requester(kind, employee_id)
        .await?;

    let items: Vec<_> = requests.iter().map(|r| to_dto(&state, r)).collect();
    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// GET /internal/{kind}/{id}
pub async fn get_request(
    State(state): State<Arc<ApprovalRequestState>>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, CoreError> {
    let kind = parse_kind(&kind)?;

    let request = state
        .usecase
        .get_request(kind, ApprovalRequestId::from_uuid(id))
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(to_dto(&state, &request)))))
}

/// POST /internal/{kind}/{id}/decision
///
/// 操作者の担当ステージに承認/却下を記録する。
/// 担当ステージが今は操作できない場合は 409（not-eligible）を返し、申請は変更しない。
pub async fn decide_request(
    State(state): State<Arc<ApprovalRequestState>>,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(req): Json<DecisionRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let kind = parse_kind(&kind)?;
    let version =
        Version::try_from(req.version).map_err(|e| CoreError::BadRequest(e.to_string()))?;

    let input = DecideInput {
        decision: req.decision,
        acting_position: req.acting_position,
        version,
    };
    let request = state
        .usecase
        .decide(kind, ApprovalRequestId::from_uuid(id), input)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(to_dto(&state, &request)))))
}

/// DELETE /internal/{kind}/{id}
pub async fn delete_request(
    State(state): State<Arc<ApprovalRequestState>>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, CoreError> {
    let kind = parse_kind(&kind)?;

    state
        .usecase
        .delete_request(kind, ApprovalRequestId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
