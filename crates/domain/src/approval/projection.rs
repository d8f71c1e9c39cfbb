//! # 表示ステータスの導出
//!
//! ステータスベクタ全体を 1 つの表示ステータスに集約する。
//! 休暇申請・持ち出し申請のどちらにも、ステージ数に関係なく同じ規則を適用する。
//!
//! 評価順序は固定:
//!
//! 1. いずれかのステージが却下 → `Rejected`
//! 2. 全ステージが承認 → `Accepted`
//! 3. いずれかのステージが保留 → `Pending`
//! 4. それ以外（未知のコードを含む） → `Unknown`
//!
//! 却下は位置に関係なく最優先される。「最終ステージで決まる」規則ではない。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use super::stage::StageStatus;

/// 申請全体の表示ステータス
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
pub enum OverallStatus {
    Pending,
    Accepted,
    Rejected,
    Unknown,
}

/// 生のステータスコード列から表示ステータスを導出する
///
/// 読み取り経路で使うため、未知のコードが混じっていても失敗しない。
/// 空の列は「全ステージが承認」を満たすため `Accepted` になる。
pub fn project<I>(codes: I) -> OverallStatus
where
    I: IntoIterator<Item = i16>,
{
    let codes: Vec<i16> = codes.into_iter().collect();

    if codes.contains(&StageStatus::REJECTED_CODE) {
        OverallStatus::Rejected
    } else if codes.iter().all(|&c| c == StageStatus::ACCEPTED_CODE) {
        OverallStatus::Accepted
    } else if codes.contains(&StageStatus::PENDING_CODE) {
        OverallStatus::Pending
    } else {
        OverallStatus::Unknown
    }
}

/// 1 ステージ分のコードを表示ステータスにする（ステージ別の列表示用）
pub fn project_stage(code: i16) -> OverallStatus {
    project([code])
}
