//! # ステータスベクタ
//!
//! 申請 1 件分のステージ別ステータスを、保存されている整数コードのまま保持する。
//! 表示は未知のコードを含んでいても導出できる（`Unknown`）が、状態遷移の入力に
//! なるのは [`StatusVector::stages`] で全コードが有効と確認できた場合だけ。

use super::{
    error::ApprovalError,
    projection::{OverallStatus, project, project_stage},
    stage::{ApproverRole, StageIndex, StageStatus},
};

/// ステージ別ステータスの並び
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVector(Vec<i16>);

impl StatusVector {
    /// 全ステージが保留のベクタを作成する
    pub fn all_pending(stage_count: usize) -> Self {
        Self(vec![StageStatus::PENDING_CODE; stage_count])
    }

    /// 保存済みの整数コード列から復元する
    ///
    /// 未知のコードもそのまま保持する。
    pub fn from_codes(codes: Vec<i16>) -> Self {
        Self(codes)
    }

    /// 全ステージのステータスを返す
    ///
    /// # エラー
    ///
    /// 未知のコードが含まれる場合は `ApprovalError::InvalidVectorShape` を返す。
    pub fn stages(&self) -> Result<Vec<StageStatus>, ApprovalError> {
        self.0
            .iter()
            .enumerate()
            .map(|(position, &code)| {
                StageStatus::from_code(code).ok_or_else(|| {
                    ApprovalError::InvalidVectorShape(format!(
                        "ステージ {} のコード {code} は不明です",
                        StageIndex::from_position(position)
                    ))
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 指定ステージの生コード
    pub fn code_at(&self, stage: StageIndex) -> Option<i16> {
        self.0.get(stage.position()).copied()
    }

    /// 永続化・API 用の整数コード列
    pub fn codes(&self) -> Vec<i16> {
        self.0.clone()
    }

    /// 申請全体の表示ステータス
    pub fn overall_status(&self) -> OverallStatus {
        project(self.0.iter().copied())
    }

    /// ステージ別の表示ラベル
    ///
    /// 見出しはロール順に並べた `"<ロール表示名> Status"`。
    /// 設定より多く保存されているステージは `"Stage <番号> Status"` になる。
    pub fn stage_labels(&self, roles: &[ApproverRole]) -> Vec<(String, OverallStatus)> {
        self.0
            .iter()
            .enumerate()
            .map(|(position, &code)| {
                let label = match roles.get(position) {
                    Some(role) => format!("{} Status", role.label()),
                    None => format!("Stage {} Status", StageIndex::from_position(position)),
                };
                (label, project_stage(code))
            })
            .collect()
    }

    /// 指定ステージだけを置き換えたベクタを返す
    ///
    /// 範囲外のステージは呼び出し側で事前に除外されている前提。
    pub(crate) fn with_stage(&self, stage: StageIndex, status: StageStatus) -> Self {
        let mut codes = self.0.clone();
        if let Some(slot) = codes.get_mut(stage.position()) {
            *slot = status.code();
        }
        Self(codes)
    }
}

impl FromIterator<StageStatus> for StatusVector {
    fn from_iter<T: IntoIterator<Item = StageStatus>>(iter: T) -> Self {
        Self(iter.into_iter().map(StageStatus::code).collect())
    }
}
