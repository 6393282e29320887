use log::debug;
use reqwest::Method;
use std::sync::Arc;
use std::time::Instant;

use crate::client::{Config, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::command::{Command, Verb};
use crate::credential::Credential;
use crate::encode::form_encode_pairs;
use crate::error::Result;
use crate::params::{flatten, ParamValue, Params};
use crate::response::{Document, Format, Response};
use crate::token::TokenResponse;

/// Client for the TripIt API
///
/// Holds the configuration, the credential used to authorize every call
/// and the transport that performs the HTTP round trips.
#[derive(Clone)]
pub struct TripitClient {
    config: Config,
    credential: Arc<dyn Credential>,
    transport: Arc<dyn Transport>,
}

impl TripitClient {
    /// Create a client for the public API with default configuration
    pub fn new<C>(credential: C) -> Result<Self>
    where
        C: Credential + 'static,
    {
        Self::with_config(credential, Config::default())
    }

    /// Create a client with custom configuration
    pub fn with_config<C>(credential: C, config: Config) -> Result<Self>
    where
        C: Credential + 'static,
    {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(credential, config, transport))
    }

    /// Create a client that sends requests through a custom transport
    pub fn with_transport<C, T>(credential: C, config: Config, transport: T) -> Self
    where
        C: Credential + 'static,
        T: Transport + 'static,
    {
        TripitClient {
            config,
            credential: Arc::new(credential),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credential(&self) -> &dyn Credential {
        self.credential.as_ref()
    }

    /// Execute a named command such as `get_trip` and decode the response
    ///
    /// # Arguments
    /// * `command` - Command name, verb and entity joined by `_`
    /// * `url_args` - Query string arguments
    /// * `post_args` - Form body arguments; their presence makes this a POST
    ///
    /// # Returns
    /// The response decoded as JSON when `format=json` was requested,
    /// as XML otherwise
    pub fn execute_command(
        &self,
        command: &str,
        url_args: Option<&Params>,
        post_args: Option<&Params>,
    ) -> Result<Response> {
        let command = Command::parse(command)?;
        self.execute(&command, url_args, post_args)
    }

    /// Execute a parsed command and decode the response
    pub fn execute(
        &self,
        command: &Command,
        url_args: Option<&Params>,
        post_args: Option<&Params>,
    ) -> Result<Response> {
        let http_response = self.do_request(command, url_args, post_args)?;

        let format = response_format(url_args, post_args);
        let document = Document::parse(format, &http_response.body)?;

        Ok(Response {
            status: http_response.status,
            document,
        })
    }

    /// Obtain an unauthorized request token
    pub fn get_request_token(&self) -> Result<TokenResponse> {
        self.token_request(Verb::RequestToken)
    }

    /// Exchange the authorized request token for an access token
    pub fn get_access_token(&self) -> Result<TokenResponse> {
        self.token_request(Verb::AccessToken)
    }

    fn token_request(&self, verb: Verb) -> Result<TokenResponse> {
        let http_response = self.do_request(&Command::new(verb, None), None, None)?;
        Ok(TokenResponse::from_http(&http_response))
    }

    /// Build, authorize and send a request, returning the raw response
    fn do_request(
        &self,
        command: &Command,
        url_args: Option<&Params>,
        post_args: Option<&Params>,
    ) -> Result<HttpResponse> {
        let api_root = self.config.api_root();
        let base_url = command.base_url(api_root, &self.config.api_version);

        let url_args = url_args.filter(|args| !args.is_empty());
        let post_args = post_args.filter(|args| !args.is_empty());

        let url = match url_args {
            Some(args) => format!("{}?{}", base_url, form_encode_pairs(flatten(args))),
            None => base_url.clone(),
        };

        // A form body is signed in place of the query arguments
        let (method, signed_args) = match post_args {
            Some(args) => (Method::POST, Some(args)),
            None => (Method::GET, url_args),
        };

        let mut request = HttpRequest::new(method.clone(), url);
        if let Some(args) = post_args {
            request.form = Some(
                flatten(args)
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
        }

        self.credential
            .authorize(method.as_str(), api_root, &base_url, signed_args)
            .apply(&mut request);

        let start = Instant::now();
        let response = self.transport.send(&request)?;
        debug!(
            "[tripit] {} {} => {:?} (status: {})",
            method,
            base_url,
            start.elapsed(),
            response.status
        );

        Ok(response)
    }
}

impl std::fmt::Debug for TripitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripitClient")
            .field("config", &self.config)
            .field("credential", &self.credential)
            .finish()
    }
}

/// `format` from the URL args, then the post args, defaulting to XML
fn response_format(url_args: Option<&Params>, post_args: Option<&Params>) -> Format {
    let declared = |args: Option<&Params>| {
        args.and_then(|a| a.get("format"))
            .and_then(ParamValue::as_single)
            .map(str::to_string)
    };

    declared(url_args)
        .or_else(|| declared(post_args))
        .map(|name| Format::from_name(&name))
        .unwrap_or_default()
}
