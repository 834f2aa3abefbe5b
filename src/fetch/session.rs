use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

use reqwest::{
    cookie::{CookieStore, Jar},
    header::HeaderValue,
    Client,
};
use url::Url;

use crate::config::PortalConfig;

/// A [`Jar`] that also remembers every cookie it was handed, whatever its
/// host or path.
#[derive(Debug, Default)]
pub struct SessionJar {
    jar: Jar,
    received: Mutex<BTreeMap<String, String>>,
}

impl SessionJar {
    /// Name and value of each live cookie received so far.
    pub fn received(&self) -> BTreeMap<String, String> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, set_cookie: &str) {
        let mut parts = set_cookie.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let mut received = self.received.lock().unwrap_or_else(PoisonError::into_inner);
        if parts.any(is_expiring_attribute) {
            received.remove(name);
        } else {
            received.insert(name.to_owned(), value.trim().to_owned());
        }
    }
}

/// `Max-Age=0` or a negative `Max-Age` is how a server deletes a cookie.
fn is_expiring_attribute(attribute: &str) -> bool {
    attribute
        .trim()
        .split_once('=')
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case("max-age"))
        .and_then(|(_, value)| value.trim().parse::<i64>().ok())
        .is_some_and(|max_age| max_age <= 0)
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();
        for header in &headers {
            if let Ok(set_cookie) = header.to_str() {
                self.record(set_cookie);
            }
        }
        self.jar.set_cookies(&mut headers.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

/// An HTTP client with a cookie jar of its own. Created for one request and
/// dropped with it.
#[derive(Debug)]
pub struct Session {
    client: Client,
    jar: Arc<SessionJar>,
    portal: Arc<PortalConfig>,
}

impl Session {
    pub fn open(portal: Arc<PortalConfig>) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(SessionJar::default());
        let client = super::make_client(Arc::clone(&jar), &portal)?;
        Ok(Self {
            client,
            jar,
            portal,
        })
    }

    pub const fn client(&self) -> &Client {
        &self.client
    }

    pub fn portal(&self) -> &PortalConfig {
        &self.portal
    }

    /// Every cookie the portal handed this session, by name.
    pub fn cookies(&self) -> BTreeMap<String, String> {
        self.jar.received()
    }
}
