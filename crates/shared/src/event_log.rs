//! # ビジネスイベントログの構造化ヘルパー
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! フィールドはドット記法（`event.category`、`error.kind`）で命名する。
//! JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` を自動付与し、`tracing::info!` レベルで出力する。
/// 呼び出し側のクレートは `tracing` に依存している必要がある。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: [`event::category`] の定数
/// - `event.action`: [`event::action`] の定数
/// - `event.result`: [`event::result`] の定数
///
/// ## 推奨フィールド
///
/// - `event.entity_type`, `event.entity_id`
/// - `event.actor`: 操作者の役職（管理コンソールからの操作は `"administrative"`）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const APPROVAL: &str = "approval";
    }

    /// イベントアクション
    pub mod action {
        pub const REQUEST_CREATED: &str = "request.created";
        pub const REQUEST_DELETED: &str = "request.deleted";
        pub const STAGE_ACCEPTED: &str = "stage.accepted";
        pub const STAGE_REJECTED: &str = "stage.rejected";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const LEAVE_REQUEST: &str = "leave_request";
        pub const PACKAGE_OUT_REQUEST: &str = "package_out_request";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        pub const INFRASTRUCTURE: &str = "infrastructure";
        pub const DATA_INTEGRITY: &str = "data_integrity";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const INVALID_RECORD: &str = "invalid_record";
        pub const INTERNAL: &str = "internal";
    }
}
