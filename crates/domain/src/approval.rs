//! # 多段承認
//!
//! 申請 1 件は承認ステージごとのステータス（保留・承認・却下）を持つ。
//! ステージはロール順に 1 つずつ判断され、前段がすべて承認済みのステージだけが
//! 操作できる。どこかで却下されると、それより後のステージは保留のまま残る。
//!
//! ## 構成
//!
//! - [`stage`] - ステージ番号・ステータス・ロールなどの値オブジェクト
//! - [`status_vector`] - 申請 1 件分のステータスの並び
//! - [`config`] - 申請種別ごとのロール設定と操作可否の判定
//! - [`request`] - 承認申請エンティティと状態遷移
//! - [`projection`] - 表示ステータスの導出
//! - [`error`] - 承認操作のエラー

pub mod config;
pub mod error;
pub mod projection;
pub mod request;
pub mod stage;
pub mod status_vector;

pub use config::{ApprovalStageConfig, ApprovalStageTable};
pub use error::{ApprovalError, Ineligibility};
pub use projection::{OverallStatus, project, project_stage};
pub use request::{
    ApprovalRequest,
    ApprovalRequestId,
    ApprovalRequestRecord,
    NewApprovalRequest,
    RequestSubject,
};
pub use stage::{ApproverRole, Decision, RequestKind, StageIndex, StageStatus};
pub use status_vector::StatusVector;
