use std::{env, net::SocketAddr, time::Duration};

use axum::http::HeaderValue;
use url::Url;

use crate::error::Error;

pub const DEFAULT_PORTAL_URL: &str = "https://tou.edu.kz/student_cabinet/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the student portal lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Page that takes the login form and serves the schedule.
    pub cabinet_url: Url,
    /// Applied to each outbound request. Requests are never retried.
    pub timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            cabinet_url: Url::parse(DEFAULT_PORTAL_URL).expect("default portal url should be valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PortalConfig {
    /// The cabinet page with the query that selects the timetable module.
    pub fn schedule_url(&self) -> Url {
        let mut url = self.cabinet_url.clone();
        url.query_pairs_mut()
            .append_pair("lang", "rus")
            .append_pair("mod", "rasp");
        url
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub portal: PortalConfig,
    /// `None` allows any origin.
    pub allowed_origins: Option<Vec<HeaderValue>>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| Error::config(format!("invalid HOST/PORT `{host}:{port}`: {e}")))?;

        let mut portal = PortalConfig::default();
        if let Some(url) = lookup("PORTAL_URL") {
            portal.cabinet_url =
                Url::parse(&url).map_err(|e| Error::config(format!("invalid PORTAL_URL: {e}")))?;
        }
        if let Some(secs) = lookup("PORTAL_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| Error::config(format!("invalid PORTAL_TIMEOUT_SECS: {e}")))?;
            if secs == 0 {
                return Err(Error::config("PORTAL_TIMEOUT_SECS must be positive"));
            }
            portal.timeout = Duration::from_secs(secs);
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .filter(|origins| origins.trim() != "*")
            .map(|origins| parse_origins(&origins))
            .transpose()?;

        Ok(Self {
            addr,
            portal,
            allowed_origins,
        })
    }
}

/// Comma separated origins. `*` only means "any origin" on its own.
fn parse_origins(origins: &str) -> Result<Vec<HeaderValue>, Error> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(Error::config(
                    "ALLOWED_ORIGINS cannot mix `*` with other origins",
                ));
            }
            HeaderValue::from_str(origin).map_err(|e| {
                Error::config(format!("invalid origin `{origin}` in ALLOWED_ORIGINS: {e}"))
            })
        })
        .collect()
}
