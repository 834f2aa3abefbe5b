//! A stand-in for the student portal, served on a local port.
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tokio::net::TcpListener;
use url::Url;

use crate::config::PortalConfig;
use crate::parse::fixtures::{CABINET_PAGE, LOGIN_PAGE};

pub const LOGIN: &str = "student";
pub const PASSWORD: &str = "secret";
pub const SESSION_COOKIE: &str = "abc123";
/// Set on login for a path outside the cabinet.
pub const ADS_COOKIE: &str = "xyz";
/// How long a hanging portal takes to serve the schedule.
const HANG: Duration = Duration::from_secs(5);
/// Client timeout used against a hanging portal.
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(1);

struct PortalState {
    schedule_page: &'static str,
    schedule_delay: Option<Duration>,
    hits: AtomicUsize,
}

pub struct FakePortal {
    pub config: Arc<PortalConfig>,
    state: Arc<PortalState>,
}

impl FakePortal {
    /// Starts a portal that serves `schedule_page` to logged in users.
    pub async fn spawn(schedule_page: &'static str) -> Self {
        Self::spawn_with(schedule_page, None).await
    }

    /// Like [`FakePortal::spawn`], but logins succeed and the schedule page
    /// never arrives within the client's timeout.
    pub async fn spawn_hanging(schedule_page: &'static str) -> Self {
        Self::spawn_with(schedule_page, Some(HANG)).await
    }

    async fn spawn_with(schedule_page: &'static str, schedule_delay: Option<Duration>) -> Self {
        let state = Arc::new(PortalState {
            schedule_page,
            schedule_delay,
            hits: AtomicUsize::new(0),
        });
        let app = Router::new()
            .route("/student_cabinet/", get(cabinet).post(login))
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let config = PortalConfig {
            cabinet_url: Url::parse(&format!("http://{addr}/student_cabinet/")).unwrap(),
            timeout: schedule_delay.map_or(PortalConfig::default().timeout, |_| SHORT_TIMEOUT),
        };
        Self {
            config: Arc::new(config),
            state,
        }
    }

    /// Requests the portal has received so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

/// A portal config pointing at a port nothing listens on.
pub async fn unreachable() -> Arc<PortalConfig> {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Arc::new(PortalConfig {
        cabinet_url: Url::parse(&format!("http://{addr}/student_cabinet/")).unwrap(),
        ..PortalConfig::default()
    })
}

async fn login(
    State(state): State<Arc<PortalState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let accepted = form.get("user").map(String::as_str) == Some(LOGIN)
        && form.get("password").map(String::as_str) == Some(PASSWORD);
    if accepted {
        (
            AppendHeaders([
                (
                    header::SET_COOKIE,
                    format!("PHPSESSID={SESSION_COOKIE}; Path=/"),
                ),
                (header::SET_COOKIE, format!("ads_id={ADS_COOKIE}; Path=/ads/")),
            ]),
            Html(CABINET_PAGE),
        )
            .into_response()
    } else {
        // the real portal hands out a session even to rejected logins
        (
            [(header::SET_COOKIE, "PHPSESSID=guest; Path=/".to_string())],
            Html(LOGIN_PAGE),
        )
            .into_response()
    }
}

async fn cabinet(
    State(state): State<Arc<PortalState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Html<&'static str> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let logged_in = headers
        .get(header::COOKIE)
        .and_then(|cookie| cookie.to_str().ok())
        .is_some_and(|cookie| cookie.contains(&format!("PHPSESSID={SESSION_COOKIE}")));
    let wants_schedule = query.get("lang").map(String::as_str) == Some("rus")
        && query.get("mod").map(String::as_str) == Some("rasp");
    match (logged_in, wants_schedule) {
        (true, true) => {
            if let Some(delay) = state.schedule_delay {
                tokio::time::sleep(delay).await;
            }
            Html(state.schedule_page)
        }
        (true, false) => Html(CABINET_PAGE),
        (false, _) => Html(LOGIN_PAGE),
    }
}
