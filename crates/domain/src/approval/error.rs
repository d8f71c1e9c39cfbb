//! # 承認操作のエラー
//!
//! 状態機械が返すエラー。`NotEligible` は「今は操作できない」ことを表し、
//! 上流の状態が変わるまで再試行しても結果は変わらない。

use thiserror::Error;

use super::stage::StageIndex;

/// 承認操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    /// 操作者がこのステージを今は操作できない
    ///
    /// レコードは一切変更されない。
    #[error("ステージ {stage} は操作できません: {reason}")]
    NotEligible {
        stage:  StageIndex,
        reason: Ineligibility,
    },

    /// 操作者の役職に対応する承認ステージがない
    #[error("承認権限のない操作者です: {position}")]
    NoApproverRole { position: String },

    /// ステータスベクタが状態遷移の入力にならない
    ///
    /// 長さが設定と一致しない、または未知のコードを含む。
    /// 参照は可能だが、補正せずに操作を中止する。
    #[error("ステータスベクタが不正です: {0}")]
    InvalidVectorShape(String),
}

/// 操作できない理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    /// ステージ番号が設定されたステージ数を超えている
    #[error("存在しないステージです")]
    StageOutOfRange,

    /// 前段のステージがまだ承認されていない（保留または却下）
    #[error("前段のステージ {0} が承認されていません")]
    PredecessorNotAccepted(StageIndex),

    /// このステージは判断済み
    #[error("このステージは判断済みです")]
    AlreadyDecided,

    /// 後段のステージが既に判断済み
    #[error("後段のステージ {0} が判断済みです")]
    DownstreamStarted(StageIndex),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_eligibleのメッセージに理由が含まれる() {
        let stage = StageIndex::new(4).unwrap();
        let err = ApprovalError::NotEligible {
            stage,
            reason: Ineligibility::PredecessorNotAccepted(StageIndex::new(3).unwrap()),
        };

        assert_eq!(
            err.to_string(),
            "ステージ 4 は操作できません: 前段のステージ 3 が承認されていません"
        );
    }
}
