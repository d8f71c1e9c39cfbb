//! # 承認ステージの値オブジェクト
//!
//! ステージ番号、ステージごとのステータスコード、承認者ロール、判断、申請種別。

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// 承認ステージ番号（1 始まり）
///
/// ステージ 1 が最初の承認者（人事・管理者）に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct StageIndex(NonZeroUsize);

impl StageIndex {
    /// ステージ 1
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// 1 始まりの番号から作成する。0 は `None`。
    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Self)
    }

    /// 0 始まりの位置から作成する
    pub fn from_position(position: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(position))
    }

    /// 1 始まりの番号
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// ステータスベクタ上の位置（0 始まり）
    pub fn position(self) -> usize {
        self.0.get() - 1
    }
}

/// ステージごとの判断ステータス
///
/// 永続化・API では整数コード（1 = 保留, 2 = 承認, 3 = 却下）で表現する。
/// それ以外のコードは状態遷移の入力として扱わない。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageStatus {
    /// 保留（未判断）
    Pending,
    /// 承認
    Accepted,
    /// 却下
    Rejected,
}

impl StageStatus {
    pub const PENDING_CODE: i16 = 1;
    pub const ACCEPTED_CODE: i16 = 2;
    pub const REJECTED_CODE: i16 = 3;

    pub fn code(self) -> i16 {
        match self {
            Self::Pending => Self::PENDING_CODE,
            Self::Accepted => Self::ACCEPTED_CODE,
            Self::Rejected => Self::REJECTED_CODE,
        }
    }

    /// 整数コードから変換する。未知のコードは `None`。
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            Self::PENDING_CODE => Some(Self::Pending),
            Self::ACCEPTED_CODE => Some(Self::Accepted),
            Self::REJECTED_CODE => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// 承認者ロール
///
/// ステージ設定で並べる単位。`Administrative` は未認証の管理コンソール
/// （操作者 ID が null）に対応し、役職文字列を持たない。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ApproverRole {
    /// 人事・管理者（null 操作者）
    #[strum(to_string = "hr", serialize = "administrative")]
    Administrative,
    /// 総支配人
    GeneralManager,
    /// 工場長
    FactoryManager,
    /// LSO 担当官
    LsoOfficer,
}

impl ApproverRole {
    /// 従業員マスタ上の役職名
    ///
    /// 管理者ロールは役職ではなく「ログイン従業員なし」で識別するため `None`。
    pub fn position(self) -> Option<&'static str> {
        match self {
            Self::Administrative => None,
            Self::GeneralManager => Some("General Manager"),
            Self::FactoryManager => Some("Factory Manager"),
            Self::LsoOfficer => Some("LSO Officer"),
        }
    }

    /// 表示用ラベル（ステージ別ステータス列の見出し）
    pub fn label(self) -> &'static str {
        match self {
            Self::Administrative => "HR Manager",
            Self::GeneralManager => "General Manager",
            Self::FactoryManager => "Factory Manager",
            Self::LsoOfficer => "LSO Manager",
        }
    }
}

/// 承認者の判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Decision {
    /// 承認
    Accept,
    /// 却下
    Reject,
}

impl Decision {
    /// 判断を記録した後のステージステータス
    pub fn resulting_status(self) -> StageStatus {
        match self {
            Self::Accept => StageStatus::Accepted,
            Self::Reject => StageStatus::Rejected,
        }
    }
}

/// 申請種別
///
/// 種別ごとに承認ステージ設定を持つ。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestKind {
    /// 休暇申請
    Leave,
    /// 持ち出し申請
    PackageOut,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_stage_index_0はnone() {
        assert_eq!(StageIndex::new(0), None);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(3, 4)]
    fn test_stage_index_位置と番号の対応(#[case] position: usize, #[case] number: usize) {
        let stage = StageIndex::from_position(position);

        assert_eq!(stage.get(), number);
        assert_eq!(stage.position(), position);
        assert_eq!(StageIndex::new(number), Some(stage));
    }

    #[rstest]
    #[case(StageStatus::Pending, 1)]
    #[case(StageStatus::Accepted, 2)]
    #[case(StageStatus::Rejected, 3)]
    fn test_stage_statusのコード対応(#[case] status: StageStatus, #[case] code: i16) {
        assert_eq!(status.code(), code);
        assert_eq!(StageStatus::from_code(code), Some(status));
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(-1)]
    fn test_stage_status_未知のコードはnone(#[case] code: i16) {
        assert_eq!(StageStatus::from_code(code), None);
    }

    #[rstest]
    #[case("hr", ApproverRole::Administrative)]
    #[case("administrative", ApproverRole::Administrative)]
    #[case("general_manager", ApproverRole::GeneralManager)]
    #[case("Factory_Manager", ApproverRole::FactoryManager)]
    #[case("lso_officer", ApproverRole::LsoOfficer)]
    fn test_approver_roleを設定文字列から解析できる(
        #[case] input: &str,
        #[case] expected: ApproverRole,
    ) {
        assert_eq!(ApproverRole::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_approver_role_管理者は役職を持たない() {
        assert_eq!(ApproverRole::Administrative.position(), None);
        assert_eq!(
            ApproverRole::LsoOfficer.position(),
            Some("LSO Officer")
        );
    }

    #[test]
    fn test_decisionの結果ステータス() {
        assert_eq!(Decision::Accept.resulting_status(), StageStatus::Accepted);
        assert_eq!(Decision::Reject.resulting_status(), StageStatus::Rejected);
    }

    #[test]
    fn test_decisionはaccept_rejectでデシリアライズされる() {
        let decision: Decision = serde_json::from_str("\"reject\"").unwrap();

        assert_eq!(decision, Decision::Reject);
    }

    #[test]
    fn test_request_kindの文字列表現() {
        assert_eq!(RequestKind::PackageOut.to_string(), "package_out");
        assert_eq!(RequestKind::from_str("leave").unwrap(), RequestKind::Leave);
    }
}
