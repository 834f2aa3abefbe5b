mod credentials;
mod session;

#[cfg(test)]
pub(crate) mod fake_portal;

use std::sync::Arc;

use reqwest::{cookie::CookieStore, Client};
use tracing::{instrument, Level};

use crate::{
    config::PortalConfig,
    error::{Error, Result},
    parse::{self, Schedule},
};

pub use credentials::{CredentialParams, Credentials};
pub use session::Session;

/// Builds the client backing one session. Requests are sent once, never retried.
pub fn make_client<C>(jar: Arc<C>, portal: &PortalConfig) -> reqwest::Result<Client>
where
    C: CookieStore + 'static,
{
    Client::builder()
        .cookie_provider(jar)
        .gzip(true)
        .timeout(portal.timeout)
        .build()
}

/// Posts the credentials to the cabinet page. The portal answers 200 either
/// way, so the verdict comes from the page it sends back.
#[instrument(skip_all, fields(portal = %portal.cabinet_url), level = Level::DEBUG)]
pub async fn authenticate(portal: &Arc<PortalConfig>, credentials: &Credentials) -> Result<Session> {
    let session = Session::open(Arc::clone(portal))?;
    let response = session
        .client()
        .post(portal.cabinet_url.clone())
        .form(&credentials.form())
        .send()
        .await?;
    if !response.status().is_success() {
        tracing::warn!("Portal answered the login with {}", response.status());
    }
    let page = response.text().await?;

    if parse::is_login_page(&page) {
        return Err(Error::AuthenticationFailed);
    }
    tracing::debug!("Logged in to the portal");
    Ok(session)
}

pub async fn schedule_page(session: &Session) -> reqwest::Result<String> {
    let url = session.portal().schedule_url();
    let start = std::time::Instant::now();
    let text = session.client().get(url).send().await?.text().await?;
    log::trace!("Got text of schedule page in \t {:?}", start.elapsed());
    Ok(text)
}

/// Logs in and scrapes the timetable in one go.
#[instrument(skip_all, fields(portal = %portal.cabinet_url), level = Level::DEBUG)]
pub async fn schedule(portal: &Arc<PortalConfig>, credentials: &Credentials) -> Result<Schedule> {
    let session = authenticate(portal, credentials).await?;
    let page = schedule_page(&session).await?;
    let schedule = Schedule::from_html(&page)?.ok_or(Error::ScheduleNotFound)?;
    tracing::debug!(days = schedule.len(), "Parsed schedule");
    Ok(schedule)
}
