//! # Core Service 設定
//!
//! 環境変数から Core Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | No | ポート番号（デフォルト: `13001`） |
//! | `STORE_BACKEND` | No | `memory`（デフォルト）または `postgres` |
//! | `DATABASE_URL` | `postgres` の場合 | PostgreSQL 接続 URL |
//! | `LEAVE_APPROVAL_STAGES` | No | 休暇申請の承認ロール（カンマ区切り） |
//! | `PACKAGE_OUT_APPROVAL_STAGES` | No | 持ち出し申請の承認ロール（カンマ区切り） |
//! | `PACKAGE_OUT_ALLOW_PENULTIMATE_REVISION` | No | `true` で工場長の再判断を許可 |

use std::env;

use thiserror::Error;
use zenra_domain::{
    DomainError,
    approval::{ApprovalStageConfig, ApprovalStageTable},
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 13001;

/// Core Service サーバーの設定
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// バインドアドレス
    pub host:   String,
    /// ポート番号
    pub port:   u16,
    /// 申請の保存先
    pub store:  StoreBackend,
    /// 申請種別ごとの承認ステージ設定
    pub stages: ApprovalStageTable,
}

/// 申請の保存先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// プロセス内メモリ（再起動で消える）
    Memory,
    /// PostgreSQL
    Postgres { database_url: String },
}

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CORE_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),

    #[error("STORE_BACKEND は memory または postgres である必要があります: {0}")]
    UnknownStoreBackend(String),

    #[error("STORE_BACKEND=postgres には DATABASE_URL が必要です")]
    MissingDatabaseUrl,

    #[error("{variable} が不正です: {source}")]
    InvalidStages {
        variable: &'static str,
        #[source]
        source:   DomainError,
    },

    #[error("{variable} は true または false である必要があります: {value}")]
    InvalidFlag {
        variable: &'static str,
        value:    String,
    },
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("CORE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("CORE_PORT") {
            Some(value) => match value.trim().parse() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidPort(value)),
            },
            None => DEFAULT_PORT,
        };

        let store = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            },
            Some(other) => return Err(ConfigError::UnknownStoreBackend(other.to_string())),
        };

        let leave = stage_config(
            &lookup,
            "LEAVE_APPROVAL_STAGES",
            ApprovalStageConfig::leave(),
            false,
        )?;
        let allow_revision = flag(&lookup, "PACKAGE_OUT_ALLOW_PENULTIMATE_REVISION")?;
        let package_out = stage_config(
            &lookup,
            "PACKAGE_OUT_APPROVAL_STAGES",
            ApprovalStageConfig::package_out(),
            allow_revision,
        )?;

        Ok(Self {
            host,
            port,
            store,
            stages: ApprovalStageTable::new(leave, package_out),
        })
    }
}

fn stage_config(
    lookup: &impl Fn(&str) -> Option<String>,
    variable: &'static str,
    default: ApprovalStageConfig,
    allow_penultimate_revision: bool,
) -> Result<ApprovalStageConfig, ConfigError> {
    match lookup(variable) {
        Some(list) => ApprovalStageConfig::parse(&list, allow_penultimate_revision)
            .map_err(|source| ConfigError::InvalidStages { variable, source }),
        None => Ok(default.with_penultimate_revision(allow_penultimate_revision)),
    }
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    variable: &'static str,
) -> Result<bool, ConfigError> {
    match lookup(variable).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) if value.eq_ignore_ascii_case("true") => Ok(true),
        Some(value) if value.eq_ignore_ascii_case("false") => Ok(false),
        Some(value) => Err(ConfigError::InvalidFlag {
            variable,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use zenra_domain::approval::{ApproverRole, RequestKind};

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未設定ならデフォルト値になる() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 13001);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.stages, ApprovalStageTable::default());
    }

    #[test]
    fn test_postgresにはdatabase_urlが必要() {
        let result = load(&[("STORE_BACKEND", "postgres")]);

        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn test_postgresの設定() {
        let config = load(&[
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/zenra"),
            ("CORE_PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/zenra".to_string(),
            }
        );
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_承認ステージを環境変数で上書きできる() {
        let config = load(&[
            ("LEAVE_APPROVAL_STAGES", "hr,general_manager"),
            ("PACKAGE_OUT_ALLOW_PENULTIMATE_REVISION", "true"),
        ])
        .unwrap();

        let leave = config.stages.for_kind(RequestKind::Leave);
        assert_eq!(
            leave.roles(),
            &[ApproverRole::Administrative, ApproverRole::GeneralManager]
        );
        let package_out = config.stages.for_kind(RequestKind::PackageOut);
        assert_eq!(package_out.stage_count(), 4);
        assert!(package_out.allow_penultimate_revision());
    }

    #[test]
    fn test_不正な承認ステージは起動エラー() {
        let result = load(&[("PACKAGE_OUT_APPROVAL_STAGES", "general_manager,hr")]);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidStages {
                variable: "PACKAGE_OUT_APPROVAL_STAGES",
                ..
            })
        ));
    }

    #[test]
    fn test_不正なフラグとポートはエラー() {
        assert!(matches!(
            load(&[("PACKAGE_OUT_ALLOW_PENULTIMATE_REVISION", "yes")]),
            Err(ConfigError::InvalidFlag { .. })
        ));
        assert!(matches!(
            load(&[("CORE_PORT", "abc")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            load(&[("STORE_BACKEND", "redis")]),
            Err(ConfigError::UnknownStoreBackend(_))
        ));
    }
}
