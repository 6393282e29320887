use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use indexmap::IndexMap;
use log::trace;
use serde_json::Value;
use sha1::Sha1;

use crate::credential::{Authorization, Credential};
use crate::encode::encode;
use crate::error::{Result, TripitError};
use crate::natural::{natural_cmp, natural_sort};
use crate::nonce::{generate_nonce, generate_timestamp};
use crate::params::{ParamValue, Params};

pub const OAUTH_SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

const OAUTH_SIGNATURE: &str = "oauth_signature";
const OAUTH_TIMESTAMP: &str = "oauth_timestamp";

/// The OAuth parameters sent with a request, in insertion order.
pub type OAuthParameters = IndexMap<String, String>;

/// Who the consumer is acting for.
#[derive(Clone, PartialEq, Eq)]
pub enum OAuthIdentity {
    /// Two-legged: the consumer acts for itself
    Consumer,
    /// Three-legged: an access (or request) token and its secret
    Token { token: String, token_secret: String },
    /// Consumer acting for a user through `xoauth_requestor_id`
    Requestor { requestor_id: String },
}

impl std::fmt::Debug for OAuthIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OAuthIdentity::Consumer => f.write_str("Consumer"),
            OAuthIdentity::Token { token, .. } => f
                .debug_struct("Token")
                .field("token", token)
                .field("token_secret", &"<redacted>")
                .finish(),
            OAuthIdentity::Requestor { requestor_id } => f
                .debug_struct("Requestor")
                .field("requestor_id", requestor_id)
                .finish(),
        }
    }
}

/// OAuthCredential signs requests with OAuth 1.0a HMAC-SHA1.
#[derive(Clone)]
pub struct OAuthCredential {
    consumer_key: String,
    consumer_secret: String,
    identity: OAuthIdentity,
}

impl OAuthCredential {
    /// Create a two-legged credential from a consumer key and secret
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        OAuthCredential {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            identity: OAuthIdentity::Consumer,
        }
    }

    /// Create a credential that signs with a token and token secret
    pub fn with_token(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        OAuthCredential {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            identity: OAuthIdentity::Token {
                token: token.into(),
                token_secret: token_secret.into(),
            },
        }
    }

    /// Create a credential that acts for a user by requestor id
    pub fn with_requestor_id(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        requestor_id: impl Into<String>,
    ) -> Self {
        OAuthCredential {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            identity: OAuthIdentity::Requestor {
                requestor_id: requestor_id.into(),
            },
        }
    }

    /// Create a credential from optional parts, as read from configuration
    ///
    /// Empty strings count as absent. Supplying a token together with a
    /// requestor id, or only one half of a token pair, is rejected.
    pub fn try_new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: Option<String>,
        token_secret: Option<String>,
        requestor_id: Option<String>,
    ) -> Result<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        let identity = match (present(token), present(token_secret), present(requestor_id)) {
            (None, None, None) => OAuthIdentity::Consumer,
            (Some(token), Some(token_secret), None) => OAuthIdentity::Token {
                token,
                token_secret,
            },
            (None, None, Some(requestor_id)) => OAuthIdentity::Requestor { requestor_id },
            (Some(_), Some(_), Some(_)) => {
                return Err(TripitError::configuration(
                    "an OAuth token and a requestor id cannot be used together",
                ))
            }
            (Some(_), None, _) => {
                return Err(TripitError::configuration(
                    "an OAuth token requires a token secret",
                ))
            }
            (None, Some(_), _) => {
                return Err(TripitError::configuration(
                    "an OAuth token secret was given without a token",
                ))
            }
        };

        Ok(OAuthCredential {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            identity,
        })
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn identity(&self) -> &OAuthIdentity {
        &self.identity
    }

    /// Token, or an empty string when not in token mode
    pub fn token(&self) -> &str {
        match &self.identity {
            OAuthIdentity::Token { token, .. } => token,
            _ => "",
        }
    }

    /// Token secret, or an empty string when not in token mode
    pub fn token_secret(&self) -> &str {
        match &self.identity {
            OAuthIdentity::Token { token_secret, .. } => token_secret,
            _ => "",
        }
    }

    /// Requestor id, or an empty string when not in requestor mode
    pub fn requestor_id(&self) -> &str {
        match &self.identity {
            OAuthIdentity::Requestor { requestor_id } => requestor_id,
            _ => "",
        }
    }

    /// Build the `Authorization` header with an explicit nonce and timestamp
    pub fn authorization_header_at(
        &self,
        method: &str,
        realm: &str,
        base_url: &str,
        params: Option<&Params>,
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let parameters = self.oauth_parameters_at(method, base_url, params, nonce, timestamp);

        let pairs: Vec<String> = parameters
            .iter()
            .filter(|(k, _)| k.starts_with("oauth") || k.starts_with("xoauth"))
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect();

        format!("OAuth realm=\"{}\",{}", realm, pairs.join(","))
    }

    /// Build the signed OAuth parameter set with an explicit nonce and timestamp
    ///
    /// `params` take part in the signature only; they are not part of the
    /// returned set.
    pub fn oauth_parameters_at(
        &self,
        method: &str,
        base_url: &str,
        params: Option<&Params>,
        nonce: &str,
        timestamp: i64,
    ) -> OAuthParameters {
        let mut parameters = OAuthParameters::new();
        parameters.insert("oauth_consumer_key".to_string(), self.consumer_key.clone());
        parameters.insert("oauth_nonce".to_string(), nonce.to_string());
        parameters.insert(OAUTH_TIMESTAMP.to_string(), timestamp.to_string());
        parameters.insert(
            "oauth_signature_method".to_string(),
            OAUTH_SIGNATURE_METHOD.to_string(),
        );
        parameters.insert("oauth_version".to_string(), OAUTH_VERSION.to_string());

        match &self.identity {
            OAuthIdentity::Consumer => {}
            OAuthIdentity::Token { token, .. } => {
                parameters.insert("oauth_token".to_string(), token.clone());
            }
            OAuthIdentity::Requestor { requestor_id } => {
                parameters.insert("xoauth_requestor_id".to_string(), requestor_id.clone());
            }
        }

        let mut signable: Params = parameters
            .iter()
            .map(|(k, v)| (k.clone(), ParamValue::Single(v.clone())))
            .collect();
        if let Some(params) = params {
            for (k, v) in params {
                signable.insert(k.clone(), v.clone());
            }
        }

        let signature = self.generate_signature(method, base_url, &signable);
        parameters.insert(OAUTH_SIGNATURE.to_string(), signature);

        parameters
    }

    /// Build the signed OAuth parameter set with a fresh nonce and timestamp
    pub fn oauth_parameters(
        &self,
        method: &str,
        base_url: &str,
        params: Option<&Params>,
    ) -> OAuthParameters {
        self.oauth_parameters_at(
            method,
            base_url,
            params,
            &generate_nonce(),
            generate_timestamp(),
        )
    }

    /// Signing key: encoded consumer secret and token secret joined by `&`
    pub fn signing_key(&self) -> String {
        format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(self.token_secret())
        )
    }

    /// Compute the base64 HMAC-SHA1 signature of a request
    pub fn generate_signature(&self, method: &str, base_url: &str, params: &Params) -> String {
        let base_string = signature_base_string(method, base_url, params);
        trace!("oauth signature base string: {}", base_string);

        base64_hmac_sha1(self.signing_key().as_bytes(), base_string.as_bytes())
    }

    /// Parameters for a web redirect login, serialized as JSON
    ///
    /// The parameter set is signed as a GET against `action` with
    /// `redirect_url` included in the signature.
    pub fn session_parameters(&self, redirect_url: &str, action: &str) -> Result<String> {
        let mut args = Params::new();
        args.insert("redirect_url".to_string(), redirect_url.into());

        let parameters = self.oauth_parameters("GET", action, Some(&args));
        session_json(parameters, redirect_url, action)
    }
}

fn session_json(parameters: OAuthParameters, redirect_url: &str, action: &str) -> Result<String> {
    let mut session: IndexMap<String, Value> = parameters
        .into_iter()
        .map(|(k, v)| {
            let value = match (k.as_str(), v.parse::<i64>()) {
                (OAUTH_TIMESTAMP, Ok(ts)) => Value::from(ts),
                _ => Value::String(v),
            };
            (k, value)
        })
        .collect();
    session.insert("redirect_url".to_string(), Value::from(redirect_url));
    session.insert("action".to_string(), Value::from(action));

    Ok(serde_json::to_string(&session)?)
}

impl Credential for OAuthCredential {
    fn authorize(
        &self,
        method: &str,
        realm: &str,
        base_url: &str,
        params: Option<&Params>,
    ) -> Authorization {
        Authorization::Header(self.authorization_header_at(
            method,
            realm,
            base_url,
            params,
            &generate_nonce(),
            generate_timestamp(),
        ))
    }
}

// Implement Debug manually to avoid exposing the secrets
impl std::fmt::Debug for OAuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredential")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

/// Normalize params into the `key=value&...` string that gets signed
///
/// Keys and values are encoded, `oauth_signature` is dropped, and pairs
/// are ordered naturally by key, then by value for repeated keys.
pub fn signable_parameters(params: &Params) -> String {
    let mut entries: Vec<(String, Vec<String>)> = params
        .iter()
        .filter(|(k, _)| k.as_str() != OAUTH_SIGNATURE)
        .map(|(k, v)| (encode(k), v.values().map(encode).collect()))
        .collect();

    entries.sort_by(|a, b| natural_cmp(&a.0, &b.0));

    let mut pairs = Vec::new();
    for (key, mut values) in entries {
        natural_sort(&mut values);
        for value in values {
            pairs.push(format!("{}={}", key, value));
        }
    }

    pairs.join("&")
}

/// Build the signature base string: `METHOD&url&params`, each part encoded
pub fn signature_base_string(method: &str, base_url: &str, params: &Params) -> String {
    let normalized_parameters = encode(&signable_parameters(params));
    let mut base_string = format!("{}&{}", method.to_uppercase(), encode(base_url));
    if !normalized_parameters.is_empty() {
        base_string.push('&');
        base_string.push_str(&normalized_parameters);
    }
    base_string
}

/// Base64 encoded HMAC with SHA1 hash.
fn base64_hmac_sha1(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts keys of any length");
    h.update(content);

    STANDARD.encode(h.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rfc_example_vector() {
        // OAuth Core 1.0, Appendix A.5
        let cred = OAuthCredential::with_token(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            "nnch734d00sl2jdk",
            "pfkkdhi9sl3r4s00",
        );
        let args = params! { "file" => "vacation.jpg", "size" => "original" };

        let mut signable = Params::new();
        for (k, v) in cred.oauth_parameters_at(
            "GET",
            "http://photos.example.net/photos",
            None,
            "kllo9940pd9333jh",
            1191242096,
        ) {
            signable.insert(k, v.into());
        }
        signable.extend(args.clone());

        assert_eq!(
            signature_base_string("GET", "http://photos.example.net/photos", &signable),
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26\
             oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26\
             oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
        );

        let parameters = cred.oauth_parameters_at(
            "GET",
            "http://photos.example.net/photos",
            Some(&args),
            "kllo9940pd9333jh",
            1191242096,
        );
        assert_eq!(parameters["oauth_signature"], "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    }

    #[test]
    fn test_header_layout() {
        let cred = OAuthCredential::with_token("ck", "cs", "tok", "ts");
        let header = cred.authorization_header_at(
            "get",
            "https://api.tripit.com",
            "https://api.tripit.com/v1/list/trip",
            None,
            "n",
            1000,
        );
        let parameters = cred.oauth_parameters_at(
            "GET",
            "https://api.tripit.com/v1/list/trip",
            None,
            "n",
            1000,
        );

        let expected = format!(
            "OAuth realm=\"https://api.tripit.com\",oauth_consumer_key=\"ck\",oauth_nonce=\"n\",\
             oauth_timestamp=\"1000\",oauth_signature_method=\"HMAC-SHA1\",oauth_version=\"1.0\",\
             oauth_token=\"tok\",oauth_signature=\"{}\"",
            encode(&parameters["oauth_signature"])
        );
        assert_eq!(header, expected);
    }

    #[test]
    fn test_requestor_id_in_header() {
        let cred = OAuthCredential::with_requestor_id("ck", "cs", "user@example.com");
        let header =
            cred.authorization_header_at("GET", "r", "https://api.tripit.com/v1/get/profile", None, "n", 1);
        assert!(header.contains(",xoauth_requestor_id=\"user%40example.com\",oauth_signature="));
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn test_caller_params_stay_out_of_header() {
        let cred = OAuthCredential::new("ck", "cs");
        let args = params! { "redirect_url" => "x" };
        let header = cred.authorization_header_at("GET", "r", "https://a/b", Some(&args), "n", 1);
        assert!(!header.contains("redirect_url"));

        let without = cred.authorization_header_at("GET", "r", "https://a/b", None, "n", 1);
        assert_ne!(header, without);
    }

    #[test]
    fn test_signature_is_deterministic() {
        let cred = OAuthCredential::with_token("ck", "cs", "t", "s");
        let args = params! { "id" => "42" };
        let a = cred.oauth_parameters_at("GET", "https://a/b", Some(&args), "n", 1000);
        let b = cred.oauth_parameters_at("GET", "https://a/b", Some(&args), "n", 1000);
        assert_eq!(a, b);

        let c = cred.oauth_parameters_at("GET", "https://a/b", Some(&args), "n", 1001);
        assert_ne!(a["oauth_signature"], c["oauth_signature"]);
        let d = cred.oauth_parameters_at("POST", "https://a/b", Some(&args), "n", 1000);
        assert_ne!(a["oauth_signature"], d["oauth_signature"]);
    }

    #[test]
    fn test_signing_key_keeps_trailing_ampersand() {
        assert_eq!(OAuthCredential::new("ck", "cs").signing_key(), "cs&");
        assert_eq!(
            OAuthCredential::with_token("ck", "c s", "t", "s~").signing_key(),
            "c%20s&s~"
        );
    }

    #[test]
    fn test_signable_parameters_multi_values() {
        let p = params! {
            "b" => vec!["z", "a10", "a2"],
            "a10" => "x",
            "a2" => "y",
            "oauth_signature" => "dropped",
        };
        assert_eq!(signable_parameters(&p), "a2=y&a10=x&b=a2&b=a10&b=z");
    }

    #[test]
    fn test_signable_parameters_encodes_keys_and_values() {
        let p = params! { "q s" => "a b", "t" => "~" };
        assert_eq!(signable_parameters(&p), "q%20s=a%20b&t=~");
    }

    #[test]
    fn test_base_string_without_params() {
        assert_eq!(
            signature_base_string("post", "https://a/b", &Params::new()),
            "POST&https%3A%2F%2Fa%2Fb"
        );
    }

    #[test]
    fn test_caller_params_override_in_signature_only() {
        let cred = OAuthCredential::new("ck", "cs");
        let args = params! { "oauth_version" => "2.0" };
        let parameters = cred.oauth_parameters_at("GET", "https://a/b", Some(&args), "n", 1);
        assert_eq!(parameters["oauth_version"], "1.0");
    }

    #[test]
    fn test_try_new_modes() {
        let cred = OAuthCredential::try_new("ck", "cs", None, None, None).unwrap();
        assert_eq!(cred.identity(), &OAuthIdentity::Consumer);

        let cred = OAuthCredential::try_new(
            "ck",
            "cs",
            Some("t".to_string()),
            Some("s".to_string()),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(cred.token(), "t");
        assert_eq!(cred.token_secret(), "s");
        assert_eq!(cred.requestor_id(), "");

        let cred =
            OAuthCredential::try_new("ck", "cs", None, None, Some("rid".to_string())).unwrap();
        assert_eq!(cred.requestor_id(), "rid");
        assert_eq!(cred.token(), "");
    }

    #[test]
    fn test_try_new_rejects_ambiguous_identity() {
        let err = OAuthCredential::try_new(
            "ck",
            "cs",
            Some("t".to_string()),
            Some("s".to_string()),
            Some("rid".to_string()),
        )
        .unwrap_err();
        assert!(err.is_configuration_error());

        let err = OAuthCredential::try_new("ck", "cs", Some("t".to_string()), None, None)
            .unwrap_err();
        assert!(err.is_configuration_error());

        let err = OAuthCredential::try_new("ck", "cs", None, Some("s".to_string()), None)
            .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_session_parameters() {
        let cred = OAuthCredential::with_token("ck", "cs", "t", "s");
        let json = cred
            .session_parameters("https://example.com/back", "https://www.tripit.com/account/login")
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["oauth_consumer_key"], "ck");
        assert_eq!(value["oauth_token"], "t");
        assert_eq!(value["redirect_url"], "https://example.com/back");
        assert_eq!(value["action"], "https://www.tripit.com/account/login");
        assert!(value["oauth_timestamp"].is_i64());
        assert!(value["oauth_signature"].is_string());

        // insertion order is kept: oauth fields first, then redirect_url and action
        assert!(json.starts_with("{\"oauth_consumer_key\":\"ck\""));
        assert!(json.ends_with("\"action\":\"https://www.tripit.com/account/login\"}"));
    }

    #[test]
    fn test_session_json_layout() {
        let cred = OAuthCredential::new("ck", "cs");
        let parameters = cred.oauth_parameters_at("GET", "https://a/login", None, "n", 1);
        let json = session_json(parameters.clone(), "https://back", "https://a/login").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["oauth_signature"], parameters["oauth_signature"].as_str());
        assert_eq!(value["oauth_timestamp"], 1);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cred = OAuthCredential::with_token("ck", "topsecret", "t", "alsosecret");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("ck"));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("alsosecret"));
    }
}
