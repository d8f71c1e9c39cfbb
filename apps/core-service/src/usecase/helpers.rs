//! ユースケース層の共通ヘルパー
//!
//! リポジトリ・ドメインの結果を `CoreError` に変換するパターンを共通化する。

use zenra_domain::approval::ApprovalError;
use zenra_infra::InfraError;

use crate::error::CoreError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// ```ignore
/// let request = self.repo.find_by_id(&id).await.or_not_found("申請")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `CoreError::NotFound`、`InfraError` の場合は `CoreError::Database` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, CoreError> {
        self?
            .ok_or_else(|| CoreError::NotFound(format!("{entity_name}が見つかりません")))
    }
}

/// 楽観的ロック付き更新の失敗を変換する
///
/// バージョン不一致は `CoreError::Conflict`、それ以外は `CoreError::Database`。
pub(crate) fn save_error(e: InfraError) -> CoreError {
    if e.as_conflict().is_some() {
        return CoreError::Conflict(
            "申請は既に更新されています。最新の情報を取得してください。".to_string(),
        );
    }
    CoreError::Database(e)
}

impl From<ApprovalError> for CoreError {
    fn from(e: ApprovalError) -> Self {
        match e {
            ApprovalError::NotEligible { .. } => CoreError::NotEligible(e.to_string()),
            ApprovalError::NoApproverRole { .. } => CoreError::Forbidden(e.to_string()),
            ApprovalError::InvalidVectorShape(_) => CoreError::Internal(e.to_string()),
        }
    }
}
