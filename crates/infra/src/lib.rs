//! # Zenra インフラ層
//!
//! 承認申請の永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: [`repository::ApprovalRequestRepository`] の PostgreSQL 実装とインメモリ実装
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
