//! # リポジトリ実装
//!
//! 承認申請の永続化インターフェースと、その PostgreSQL 実装・インメモリ実装。
//!
//! 書き込みは楽観的ロックで保護する。呼び出し側が読み込んだ時点の
//! `version` を渡し、保存済みの値と一致する場合だけ書き込む。

pub mod approval_request_repository;
pub mod in_memory;

pub use approval_request_repository::{ApprovalRequestRepository, PostgresApprovalRequestRepository};
pub use in_memory::InMemoryApprovalRequestRepository;
