use crate::client::HttpRequest;
use crate::params::Params;

/// Authorization material produced by a [`Credential`] for one request.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Value for the `Authorization` header
    Header(String),
    /// Transport-level HTTP basic authentication
    Basic { username: String, password: String },
}

impl Authorization {
    /// Attach this authorization to an outbound request
    pub fn apply(self, request: &mut HttpRequest) {
        match self {
            Authorization::Header(value) => {
                request.headers.push(("Authorization".to_string(), value));
            }
            Authorization::Basic { username, password } => {
                request.basic_auth = Some((username, password));
            }
        }
    }
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authorization::Header(value) => f.debug_tuple("Header").field(value).finish(),
            Authorization::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// A Credential authorizes outbound API calls.
///
/// Implementations are immutable once built and may be shared across
/// threads; any per-request material is derived from the arguments.
pub trait Credential: std::fmt::Debug + Send + Sync {
    /// Produce the authorization for a request
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET or POST)
    /// * `realm` - OAuth realm, the API root URL
    /// * `base_url` - Request URL without its query string
    /// * `params` - Request parameters that take part in signing
    fn authorize(
        &self,
        method: &str,
        realm: &str,
        base_url: &str,
        params: Option<&Params>,
    ) -> Authorization;
}
