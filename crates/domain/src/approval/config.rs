//! # 承認ステージ設定
//!
//! 申請種別ごとの承認ロールの並びと、操作可否の判定。
//!
//! ## 操作可否の規則
//!
//! ステージ k を操作できるのは次をすべて満たすときだけ:
//!
//! - k がステージ数の範囲内
//! - ステージ 1..k-1 がすべて承認済み
//! - ステージ k が保留
//! - ステージ k+1.. がすべて保留
//!
//! `allow_penultimate_revision` が有効な場合のみ、最後から 2 番目のステージは
//! 最終ステージが保留である限り判断をやり直せる。

use std::str::FromStr;

use itertools::Itertools;

use super::{
    error::{ApprovalError, Ineligibility},
    stage::{ApproverRole, RequestKind, StageIndex, StageStatus},
    status_vector::StatusVector,
};
use crate::DomainError;

/// 1 申請種別分の承認ステージ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalStageConfig {
    roles: Vec<ApproverRole>,
    allow_penultimate_revision: bool,
}

impl ApprovalStageConfig {
    /// ロールの並びから設定を作成する
    ///
    /// # エラー
    ///
    /// 以下の場合は `DomainError::InvalidConfiguration` を返す。
    ///
    /// - ロールが空
    /// - 先頭が管理者ロールでない、または管理者ロールが 2 番目以降にある
    /// - 同じロールが重複している
    pub fn new(
        roles: Vec<ApproverRole>,
        allow_penultimate_revision: bool,
    ) -> Result<Self, DomainError> {
        if roles.first() != Some(&ApproverRole::Administrative) {
            return Err(DomainError::InvalidConfiguration(format!(
                "先頭のステージは管理者ロール（hr）である必要があります: [{}]",
                roles.iter().join(",")
            )));
        }

        let duplicates: Vec<_> = roles.iter().duplicates().collect();
        if !duplicates.is_empty() {
            return Err(DomainError::InvalidConfiguration(format!(
                "ロールが重複しています: {}",
                duplicates.iter().join(",")
            )));
        }

        Ok(Self {
            roles,
            allow_penultimate_revision,
        })
    }

    /// カンマ区切りのロール名から設定を作成する
    ///
    /// ```rust
    /// use zenra_domain::approval::ApprovalStageConfig;
    ///
    /// let config = ApprovalStageConfig::parse("hr, general_manager", false).unwrap();
    /// assert_eq!(config.stage_count(), 2);
    /// ```
    pub fn parse(list: &str, allow_penultimate_revision: bool) -> Result<Self, DomainError> {
        let roles = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                ApproverRole::from_str(s).map_err(|_| {
                    DomainError::InvalidConfiguration(format!("不明な承認ロールです: {s}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(roles, allow_penultimate_revision)
    }

    /// 休暇申請の既定設定（人事 → 総支配人 → 工場長）
    pub fn leave() -> Self {
        Self {
            roles: vec![
                ApproverRole::Administrative,
                ApproverRole::GeneralManager,
                ApproverRole::FactoryManager,
            ],
            allow_penultimate_revision: false,
        }
    }

    /// 持ち出し申請の既定設定（人事 → 総支配人 → 工場長 → LSO 担当官）
    pub fn package_out() -> Self {
        Self {
            roles: vec![
                ApproverRole::Administrative,
                ApproverRole::GeneralManager,
                ApproverRole::FactoryManager,
                ApproverRole::LsoOfficer,
            ],
            allow_penultimate_revision: false,
        }
    }

    /// 最後から 2 番目のステージの再判断可否を差し替えた設定を返す
    pub fn with_penultimate_revision(self, allow: bool) -> Self {
        Self {
            allow_penultimate_revision: allow,
            ..self
        }
    }

    pub fn stage_count(&self) -> usize {
        self.roles.len()
    }

    pub fn roles(&self) -> &[ApproverRole] {
        &self.roles
    }

    pub fn role_at(&self, stage: StageIndex) -> Option<ApproverRole> {
        self.roles.get(stage.position()).copied()
    }

    pub fn allow_penultimate_revision(&self) -> bool {
        self.allow_penultimate_revision
    }

    /// 操作者の役職から担当ステージを解決する
    ///
    /// `None`（ログイン従業員なし）は管理者ステージ（ステージ 1）に対応する。
    /// 役職は前後の空白を除いて完全一致で比較する。
    pub fn resolve_acting_stage(&self, acting: Option<&str>) -> Option<StageIndex> {
        let position = match acting {
            None => self
                .roles
                .iter()
                .position(|role| *role == ApproverRole::Administrative),
            Some(acting) => {
                let acting = acting.trim();
                self.roles
                    .iter()
                    .position(|role| role.position() == Some(acting))
            }
        };
        position.map(StageIndex::from_position)
    }

    /// 指定ステージが今操作できるか
    ///
    /// ベクタの長さが設定と一致しない場合も `false`。
    pub fn can_act(&self, stage: StageIndex, statuses: &StatusVector) -> bool {
        self.check_eligibility(stage, statuses).is_ok()
    }

    /// 操作可否を判定し、操作できない場合はその理由を返す
    ///
    /// # エラー
    ///
    /// - ベクタの長さが設定と一致しない、または未知のコードを含む:
    ///   `ApprovalError::InvalidVectorShape`
    /// - 操作できない: `ApprovalError::NotEligible`
    pub fn check_eligibility(
        &self,
        stage: StageIndex,
        statuses: &StatusVector,
    ) -> Result<(), ApprovalError> {
        if statuses.len() != self.stage_count() {
            return Err(ApprovalError::InvalidVectorShape(format!(
                "ステージ数 {} に対してステータスが {} 件あります",
                self.stage_count(),
                statuses.len()
            )));
        }

        let statuses = statuses.stages()?;
        let not_eligible = |reason| ApprovalError::NotEligible { stage, reason };

        let Some(&own) = statuses.get(stage.position()) else {
            return Err(not_eligible(Ineligibility::StageOutOfRange));
        };

        if let Some(predecessor) = statuses
            .iter()
            .take(stage.position())
            .position(|&s| s != StageStatus::Accepted)
        {
            return Err(not_eligible(Ineligibility::PredecessorNotAccepted(
                StageIndex::from_position(predecessor),
            )));
        }

        if own != StageStatus::Pending && !self.is_revisable(stage) {
            return Err(not_eligible(Ineligibility::AlreadyDecided));
        }

        if let Some(offset) = statuses
            .iter()
            .skip(stage.get())
            .position(|&s| s != StageStatus::Pending)
        {
            return Err(not_eligible(Ineligibility::DownstreamStarted(
                StageIndex::from_position(stage.get() + offset),
            )));
        }

        Ok(())
    }

    /// 判断済みでもやり直せるステージか
    fn is_revisable(&self, stage: StageIndex) -> bool {
        self.allow_penultimate_revision
            && self.stage_count() >= 2
            && stage.get() == self.stage_count() - 1
    }
}

/// 申請種別ごとの承認ステージ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalStageTable {
    leave: ApprovalStageConfig,
    package_out: ApprovalStageConfig,
}

impl ApprovalStageTable {
    pub fn new(leave: ApprovalStageConfig, package_out: ApprovalStageConfig) -> Self {
        Self { leave, package_out }
    }

    pub fn for_kind(&self, kind: RequestKind) -> &ApprovalStageConfig {
        match kind {
            RequestKind::Leave => &self.leave,
            RequestKind::PackageOut => &self.package_out,
        }
    }
}

impl Default for ApprovalStageTable {
    fn default() -> Self {
        Self::new(
            ApprovalStageConfig::leave(),
            ApprovalStageConfig::package_out(),
        )
    }
}
