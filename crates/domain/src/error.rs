//! # ドメイン層エラー定義
//!
//! エンティティ生成・DB 復元・設定検証で発生するエラー。
//! 承認操作そのものの失敗は [`ApprovalError`](crate::approval::ApprovalError) で表現し、
//! ここには含めない。
//!
//! | エラー種別 | 用途 | HTTP ステータス |
//! |-----------|------|----------------|
//! | `Validation` | 入力値・復元値の検証失敗 | 400 Bad Request |
//! | `InvalidConfiguration` | 承認ステージ設定の不備 | 起動失敗 |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須項目の欠落、文字数超過、日付範囲の逆転など。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 承認ステージ設定エラー
    ///
    /// ステージが空、ロールの重複、管理者ロールの位置違反など。
    /// 設定読み込み時にのみ発生し、起動を中止させる。
    #[error("承認ステージ設定が不正です: {0}")]
    InvalidConfiguration(String),
}
