use indexmap::IndexMap;

use crate::client::HttpResponse;
use crate::encode::decode_form;

/// Result of a call to one of the OAuth token endpoints.
///
/// A non-200 answer is not an error at the transport level; the server's
/// raw body is handed back so the caller can inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResponse {
    /// HTTP 200, body decoded as a form-encoded query string
    Granted(IndexMap<String, String>),
    /// Any other status, with the body as received
    Rejected { status: u16, body: String },
}

impl TokenResponse {
    pub fn from_http(response: &HttpResponse) -> Self {
        if response.status == 200 {
            TokenResponse::Granted(decode_form(&response.body))
        } else {
            TokenResponse::Rejected {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, TokenResponse::Granted(_))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            TokenResponse::Granted(map) => map.get(key).map(String::as_str),
            TokenResponse::Rejected { .. } => None,
        }
    }

    /// The `oauth_token` value of a granted response
    pub fn oauth_token(&self) -> Option<&str> {
        self.get("oauth_token")
    }

    /// The `oauth_token_secret` value of a granted response
    pub fn oauth_token_secret(&self) -> Option<&str> {
        self.get("oauth_token_secret")
    }
}
