mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use common::auth::PUBLIC_VIEWER_MUR;
use common::domain::{NSTemplateTier, Signup, Space, SpaceBinding, Visibility};
use common::memory::InMemoryCluster;
use common::metrics::ProxyMetrics;
use common::telemetry::{init_telemetry, TelemetryConfig};
use config::ServiceConfig;
use spaceway_api::domain::WorkspaceService;
use spaceway_api::http::{workspace_routes, ApiState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("failed to load configuration")?;

    init_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
        json_logs: config.json_logs,
    })
    .context("failed to initialize telemetry")?;

    info!(
        host = %config.http_host,
        port = config.http_port,
        "starting spaceway proxy"
    );

    // dev-mode store; a cluster-backed ClusterStore is wired in by the
    // deployment that embeds this service
    let cluster = Arc::new(InMemoryCluster::new());
    if config.seed_demo_data {
        seed_demo_data(&cluster);
        info!("seeded demo tenant data");
    }

    let metrics = Arc::new(ProxyMetrics::new());
    let service = Arc::new(WorkspaceService::new(cluster.clone(), cluster));

    let metrics_handler = {
        let metrics = metrics.clone();
        move || {
            let metrics = metrics.clone();
            async move {
                match metrics.encode_text() {
                    Ok(body) => (
                        StatusCode::OK,
                        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                        body,
                    )
                        .into_response(),
                    Err(err) => {
                        error!(error = %err, "failed to encode metrics");
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                }
            }
        }
    };

    let app = workspace_routes(ApiState { service, metrics })
        .route("/metrics", get(metrics_handler));

    let addr: SocketAddr = format!("{}:{}", config.http_host, config.http_port)
        .parse()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;

    info!(addr = %addr, "workspace proxy listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Sample tenant for local experimentation: owner "alice" with a private
/// "home" space carrying an inert community grant.
fn seed_demo_data(cluster: &InMemoryCluster) {
    cluster.add_tier(NSTemplateTier {
        name: "base1ns".to_string(),
        space_roles: vec!["admin".to_string(), "viewer".to_string()],
    });
    cluster.add_signup(Signup {
        name: "alice".to_string(),
        compliant_username: "alice".to_string(),
    });
    cluster.add_space(Space {
        name: "home".to_string(),
        namespace: "alice-tenant".to_string(),
        creator: "alice".to_string(),
        tier_name: "base1ns".to_string(),
        parent_space: None,
        visibility: Visibility::Private,
    });
    cluster.add_space_binding(SpaceBinding {
        mur_name: "alice".to_string(),
        space_name: "home".to_string(),
        role: "admin".to_string(),
    });
    cluster.add_space_binding(SpaceBinding {
        mur_name: PUBLIC_VIEWER_MUR.to_string(),
        space_name: "home".to_string(),
        role: "viewer".to_string(),
    });
}
