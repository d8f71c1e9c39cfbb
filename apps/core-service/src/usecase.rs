//! # ユースケース層
//!
//! Core Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと時刻プロバイダを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `approval_request`: 休暇申請・持ち出し申請の作成・取得・承認・削除

pub(crate) mod helpers;

pub mod approval_request;

pub use approval_request::{ApprovalRequestUseCaseImpl, CreateRequestInput, DecideInput};
