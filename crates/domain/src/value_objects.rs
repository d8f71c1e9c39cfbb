//! # 共通値オブジェクト
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Version`] | `u32` | 楽観的ロック用のバージョン番号 |
//! | [`EmployeeId`] | `String` | 申請者（従業員）への不透明な参照 |

use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// Version（バージョン番号）
// =========================================================================

/// バージョン番号（値オブジェクト）
///
/// 申請レコードの楽観的ロックに使用する。1 から始まり、
/// 承認・却下が永続化されるたびにインクリメントされる。
///
/// ```rust
/// use zenra_domain::value_objects::Version;
///
/// let v1 = Version::initial();
/// assert_eq!(v1.next().unwrap().as_u32(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(u32);

impl Version {
    /// 永続化できる最大値（`INTEGER` 列）
    pub const MAX: u32 = i32::MAX.unsigned_abs();

    pub fn initial() -> Self {
        Self(1)
    }

    /// 指定した値からバージョンを作成する
    ///
    /// # エラー
    ///
    /// 0 の場合は `DomainError::Validation` を返す。
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::Validation(
                "バージョン番号は 1 以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 次のバージョンを返す
    ///
    /// # エラー
    ///
    /// 永続化できる上限（`i32::MAX`）を超える場合は `DomainError::Validation`。
    pub fn next(&self) -> Result<Self, DomainError> {
        self.0
            .checked_add(1)
            .filter(|&next| next <= Self::MAX)
            .map(Self)
            .ok_or_else(|| {
                DomainError::Validation(format!("バージョン番号が上限に達しました: {self}"))
            })
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// i32 に変換する（DB 互換用）
    ///
    /// # エラー
    ///
    /// i32 の範囲を超える場合は `DomainError::Validation`。
    pub fn as_i32(&self) -> Result<i32, DomainError> {
        i32::try_from(self.0).map_err(|_| {
            DomainError::Validation(format!("バージョン番号が i32 の範囲を超えています: {self}"))
        })
    }
}

impl TryFrom<i32> for Version {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| {
            DomainError::Validation("バージョン番号は 1 以上である必要があります".to_string())
        })?;
        Self::new(value)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// =========================================================================
// EmployeeId（申請者参照）
// =========================================================================

define_validated_string! {
    /// 従業員 ID（値オブジェクト）
    ///
    /// 従業員マスタは外部コラボレーターが管理するため、形式は解釈しない。
    /// ドキュメントストアのオブジェクト ID などをそのまま保持する。
    pub struct EmployeeId {
        label: "従業員 ID",
        max_length: 64,
    }
}
