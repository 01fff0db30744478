use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use common::auth::CallerIdentity;
use common::domain::{DomainError, Visibility, WorkspaceList};
use common::metrics::{
    ProxyMetrics, METRICS_LABEL_VERB_GET, METRICS_LABEL_VERB_LIST, METRICS_LABEL_VERB_PATCH,
};
use serde::Deserialize;
use tracing::instrument;

use super::error::domain_error_to_response;
use crate::domain::{
    GetWorkspaceRequest, ListWorkspacesRequest, PatchVisibilityRequest, WorkspaceService,
};

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<WorkspaceService>,
    pub metrics: Arc<ProxyMetrics>,
}

/// PATCH body; visibility is the only field mutable through this endpoint
#[derive(Debug, Deserialize)]
pub struct PatchWorkspaceBody {
    pub visibility: Visibility,
}

/// Build the workspace routes
pub fn workspace_routes(state: ApiState) -> Router {
    Router::new()
        .route("/workspaces", get(list_workspaces))
        .route(
            "/workspaces/:name",
            get(get_workspace).patch(patch_workspace),
        )
        .with_state(state)
}

/// The caller identity is inserted as a request extension by the
/// authentication middleware; its absence means an anonymous caller.
fn caller_identity(identity: Option<Extension<CallerIdentity>>) -> CallerIdentity {
    identity
        .map(|Extension(identity)| identity)
        .unwrap_or(CallerIdentity::PublicViewer)
}

#[instrument(name = "GetWorkspace", skip(state, identity), fields(workspace = %name))]
async fn get_workspace(
    State(state): State<ApiState>,
    identity: Option<Extension<CallerIdentity>>,
    Path(name): Path<String>,
) -> Response {
    let started = Instant::now();

    let request = GetWorkspaceRequest {
        identity: caller_identity(identity),
        workspace_name: name,
    };
    let response = match state.service.get_workspace(request).await {
        Ok(workspace) => (StatusCode::OK, Json(workspace)).into_response(),
        Err(err) => domain_error_to_response(err),
    };

    state.metrics.observe(
        METRICS_LABEL_VERB_GET,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

#[instrument(name = "ListWorkspaces", skip(state, identity))]
async fn list_workspaces(
    State(state): State<ApiState>,
    identity: Option<Extension<CallerIdentity>>,
) -> Response {
    let started = Instant::now();

    let request = ListWorkspacesRequest {
        identity: caller_identity(identity),
    };
    let response = match state.service.list_workspaces(request).await {
        Ok(items) => (StatusCode::OK, Json(WorkspaceList { items })).into_response(),
        Err(err) => domain_error_to_response(err),
    };

    state.metrics.observe(
        METRICS_LABEL_VERB_LIST,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

#[instrument(name = "PatchWorkspace", skip(state, identity, body), fields(workspace = %name))]
async fn patch_workspace(
    State(state): State<ApiState>,
    identity: Option<Extension<CallerIdentity>>,
    Path(name): Path<String>,
    body: Result<Json<PatchWorkspaceBody>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let response = match body {
        Err(rejection) => {
            domain_error_to_response(DomainError::ValidationError(rejection.body_text()))
        }
        Ok(Json(body)) => {
            let request = PatchVisibilityRequest {
                identity: caller_identity(identity),
                workspace_name: name,
                visibility: body.visibility,
            };
            match state.service.patch_visibility(request).await {
                Ok(workspace) => (StatusCode::OK, Json(workspace)).into_response(),
                Err(err) => domain_error_to_response(err),
            }
        }
    };

    state.metrics.observe(
        METRICS_LABEL_VERB_PATCH,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
