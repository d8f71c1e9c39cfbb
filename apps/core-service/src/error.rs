//! # Core Service エラー定義
//!
//! Core Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use zenra_infra::{InfraError, InfraErrorKind};
use zenra_shared::{ErrorResponse, event_log::error};

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 承認権限がない
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 競合（楽観的ロック失敗）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// 承認ステージが今は操作できない
    #[error("操作できません: {0}")]
    NotEligible(String),

    /// 永続化エラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let body = match &self {
            CoreError::NotFound(msg) => ErrorResponse::not_found(msg),
            CoreError::BadRequest(msg) => ErrorResponse::validation_error(msg),
            CoreError::Forbidden(msg) => ErrorResponse::forbidden(msg),
            CoreError::Conflict(msg) => ErrorResponse::conflict(msg),
            CoreError::NotEligible(msg) => ErrorResponse::not_eligible(msg),
            CoreError::Database(e) => {
                let kind = match e.kind() {
                    InfraErrorKind::InvalidRecord(_) => error::kind::INVALID_RECORD,
                    _ => error::kind::DATABASE,
                };
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = kind,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
            CoreError::Internal(msg) => {
                tracing::error!(
                    error.category = error::category::DATA_INTEGRITY,
                    error.kind = error::kind::INTERNAL,
                    "内部エラー: {}",
                    msg
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
