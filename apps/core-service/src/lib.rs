//! # Core Service ライブラリ
//!
//! 承認申請の内部 API（ハンドラ・ユースケース・設定）を公開する。
//! 統合テストからルーターを組み立てるために使う。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
