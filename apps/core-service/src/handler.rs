//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、ルーター構築もここで行う
//! - ハンドラは薄く保ち、承認判定はドメイン層に委譲

pub mod approval_request;
pub mod health;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

pub use approval_request::{
    ApprovalRequestState,
    create_request,
    decide_request,
    delete_request,
    get_request,
    list_requests,
    list_requests_by_employee,
};
pub use health::health_check;

/// Core Service のルーターを構築する
///
/// `{kind}` は `leave-requests` または `package-out-requests`。
pub fn router(state: Arc<ApprovalRequestState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/internal/{kind}", get(list_requests).post(create_request))
        .route(
            "/internal/{kind}/employee/{employee_id}",
            get(list_requests_by_employee),
        )
        .route(
            "/internal/{kind}/{id}",
            get(get_request).delete(delete_request),
        )
        .route("/internal/{kind}/{id}/decision", post(decide_request))
        .with_state(state)
}
