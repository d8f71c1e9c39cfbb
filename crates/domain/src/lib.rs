//! # Zenra ドメイン層
//!
//! 休暇申請・持ち出し申請（package-out）の多段承認ワークフローを定義する。
//!
//! ## 設計方針
//!
//! - **純粋関数**: 承認判定・状態遷移・表示ステータス導出は I/O を持たない
//! - **値オブジェクト**: ステージ番号・ステータスコードを型で表現し、不正値を排除
//! - **設定駆動**: 承認ステージ数と承認者ロールは申請種別ごとの設定で決まる
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//!      ↘                   ↑
//!        ─────────────────
//! ```
//!
//! ドメイン層は永続化・HTTP に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`approval`] - 承認ステージ、状態機械、表示ステータス
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー
//! - [`value_objects`] - 共通値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use zenra_domain::approval::{OverallStatus, project};
//!
//! assert_eq!(project([2, 3, 1]), OverallStatus::Rejected);
//! assert_eq!(project([2, 2, 2]), OverallStatus::Accepted);
//! ```

#[macro_use]
mod macros;

pub mod approval;
pub mod clock;
pub mod error;
pub mod value_objects;

pub use error::DomainError;
