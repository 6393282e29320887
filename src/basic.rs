use crate::credential::{Authorization, Credential};
use crate::params::Params;

/// BasicCredential authenticates with a TripIt username and password.
#[derive(Clone)]
pub struct BasicCredential {
    username: String,
    password: String,
}

impl BasicCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        BasicCredential {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Credential for BasicCredential {
    fn authorize(
        &self,
        _method: &str,
        _realm: &str,
        _base_url: &str,
        _params: Option<&Params>,
    ) -> Authorization {
        Authorization::Basic {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl std::fmt::Debug for BasicCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
