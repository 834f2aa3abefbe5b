use std::fmt;

use serde::{Deserialize, Serialize};

/// Login and password exactly as the caller sent them, from either the query
/// string or a form body.
#[derive(Default, Deserialize)]
pub struct CredentialParams {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl CredentialParams {
    /// `None` when there is no login to try; an empty login counts as none.
    pub fn into_credentials(self) -> Option<Credentials> {
        let login = self.login.filter(|login| !login.is_empty())?;
        Some(Credentials {
            login,
            password: self.password,
        })
    }
}

impl fmt::Debug for CredentialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialParams")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Portal credentials for a single request. Not stored and not logged.
pub struct Credentials {
    login: String,
    password: Option<String>,
}

/// Field names the portal's login form uses.
#[derive(Serialize)]
pub(super) struct LoginForm<'a> {
    user: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

impl Credentials {
    #[cfg(test)]
    pub fn new(login: impl Into<String>, password: Option<String>) -> Self {
        Self {
            login: login.into(),
            password,
        }
    }

    pub(super) fn form(&self) -> LoginForm<'_> {
        LoginForm {
            user: &self.login,
            password: self.password.as_deref(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}
