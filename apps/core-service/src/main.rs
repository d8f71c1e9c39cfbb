//! # Core Service サーバー
//!
//! 休暇申請・持ち出し申請の多段承認を扱う内部 API サーバー。
//!
//! ## 起動方法
//!
//! ```bash
//! # インメモリ保存（デフォルト）
//! cargo run -p zenra-core-service
//!
//! # PostgreSQL 保存
//! STORE_BACKEND=postgres DATABASE_URL=postgres://localhost/zenra cargo run -p zenra-core-service
//! ```
//!
//! 設定項目は [`zenra_core_service::config`] を参照。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use zenra_core_service::{
    config::{CoreConfig, StoreBackend},
    handler::{self, ApprovalRequestState},
    usecase::ApprovalRequestUseCaseImpl,
};
use zenra_domain::clock::SystemClock;
use zenra_infra::{
    db,
    repository::{
        ApprovalRequestRepository,
        InMemoryApprovalRequestRepository,
        PostgresApprovalRequestRepository,
    },
};
use zenra_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("core-service"));

    let config = CoreConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Core Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let repository: Arc<dyn ApprovalRequestRepository> = match &config.store {
        StoreBackend::Memory => {
            tracing::info!("インメモリストアを使用します");
            Arc::new(InMemoryApprovalRequestRepository::new())
        }
        StoreBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url)
                .await
                .context("データベース接続に失敗しました")?;
            db::run_migrations(&pool)
                .await
                .context("マイグレーションに失敗しました")?;
            tracing::info!("データベースに接続しました");
            Arc::new(PostgresApprovalRequestRepository::new(pool))
        }
    };

    let usecase =
        ApprovalRequestUseCaseImpl::new(repository, config.stages.clone(), Arc::new(SystemClock));
    let state = Arc::new(ApprovalRequestState { usecase });

    let app = handler::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;
    tracing::info!("Core Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await.context("サーバーエラー")?;

    Ok(())
}
