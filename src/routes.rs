use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Query, State},
    routing::get,
    Form, Json, Router,
};

use crate::{
    config::PortalConfig,
    error::{Error, Result},
    fetch::{self, CredentialParams},
    parse::Schedule,
};

/// `GET` reads the credentials from the query string, `POST` from a form body.
pub fn router(portal: Arc<PortalConfig>) -> Router {
    Router::new()
        .route("/login/", get(login_query).post(login_form))
        .route("/schedule/", get(schedule_query).post(schedule_form))
        .with_state(portal)
}

async fn login_query(
    State(portal): State<Arc<PortalConfig>>,
    Query(params): Query<CredentialParams>,
) -> Result<Json<BTreeMap<String, String>>> {
    login(&portal, params).await
}

async fn login_form(
    State(portal): State<Arc<PortalConfig>>,
    Form(params): Form<CredentialParams>,
) -> Result<Json<BTreeMap<String, String>>> {
    login(&portal, params).await
}

async fn schedule_query(
    State(portal): State<Arc<PortalConfig>>,
    Query(params): Query<CredentialParams>,
) -> Result<Json<Schedule>> {
    schedule(&portal, params).await
}

async fn schedule_form(
    State(portal): State<Arc<PortalConfig>>,
    Form(params): Form<CredentialParams>,
) -> Result<Json<Schedule>> {
    schedule(&portal, params).await
}

/// Answers with the session cookies the portal handed out.
async fn login(portal: &Arc<PortalConfig>, params: CredentialParams) -> Result<Json<BTreeMap<String, String>>> {
    let credentials = params.into_credentials().ok_or(Error::MissingLogin)?;
    let session = fetch::authenticate(portal, &credentials).await?;
    Ok(Json(session.cookies()))
}

async fn schedule(portal: &Arc<PortalConfig>, params: CredentialParams) -> Result<Json<Schedule>> {
    let credentials = params.into_credentials().ok_or(Error::MissingLogin)?;
    match fetch::schedule(portal, &credentials).await {
        Ok(schedule) => Ok(Json(schedule)),
        // a rejected login reads the same as a missing table on this route
        Err(Error::AuthenticationFailed) => Err(Error::ScheduleNotFound),
        Err(e) => Err(e),
    }
}
