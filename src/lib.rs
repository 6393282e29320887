//! # tripit - TripIt API client for Rust
//!
//! A Rust client for the TripIt travel REST API. Requests are authorized
//! either with OAuth 1.0a (HMAC-SHA1 signed `Authorization` headers) or
//! with HTTP basic authentication, and responses are decoded as XML or JSON.
//!
//! ## Features
//!
//! - Pluggable authentication through the [`Credential`] trait:
//!   - [`OAuthCredential`] for two-legged, token and requestor-id signing
//!   - [`BasicCredential`] for username/password access
//! - One request pipeline for every `get`/`list`/`create`/`replace`/`delete`
//!   operation on trips, air segments, lodging, cars and the other entities
//! - OAuth request/access token endpoints with explicit success or
//!   rejection results
//! - Generic XML element trees and JSON values with path-based access
//!
//! ## Basic Usage
//!
//! ```no_run
//! use tripit::{params, Entity, OAuthCredential, TripitClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credential = OAuthCredential::with_token(
//!         "consumer_key",
//!         "consumer_secret",
//!         "access_token",
//!         "access_token_secret",
//!     );
//!     let client = TripitClient::new(credential)?;
//!
//!     let trips = client.list(Entity::Trip, Some(&params! { "format" => "json" }))?;
//!     println!("first trip: {:?}", trips.get_string("Trip/0/display_name"));
//!
//!     let trip = client.get(Entity::Trip, 1001, None)?;
//!     println!("trip: {:?}", trip.get_string("Trip/display_name"));
//!     Ok(())
//! }
//! ```
//!
//! ## Obtaining an access token
//!
//! ```no_run
//! use tripit::{OAuthCredential, TokenResponse, TripitClient};
//!
//! let client = TripitClient::new(OAuthCredential::new("consumer_key", "consumer_secret"))?;
//! match client.get_request_token()? {
//!     TokenResponse::Granted(token) => println!("request token: {:?}", token.get("oauth_token")),
//!     TokenResponse::Rejected { status, body } => eprintln!("rejected ({}): {}", status, body),
//! }
//! # Ok::<(), tripit::TripitError>(())
//! ```
//!
//! ## Basic Authentication
//!
//! ```no_run
//! use tripit::{BasicCredential, TripitClient};
//!
//! let client = TripitClient::new(BasicCredential::new("user@example.com", "password"))?;
//! let profile = client.get_profile(None)?;
//! # Ok::<(), tripit::TripitError>(())
//! ```

pub mod basic;
pub mod client;
pub mod command;
pub mod credential;
pub mod encode;
pub mod entity;
pub mod error;
pub mod natural;
pub mod nonce;
pub mod oauth;
pub mod params;
pub mod response;
pub mod rest;
pub mod token;

// Re-export main types for convenience
pub use basic::BasicCredential;
pub use client::{Config, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use command::{Command, Verb};
pub use credential::{Authorization, Credential};
pub use entity::Entity;
pub use error::{Result, TripitError};
pub use oauth::{OAuthCredential, OAuthIdentity, OAuthParameters};
pub use params::{ParamValue, Params};
pub use response::{Document, Format, Response, XmlElement};
pub use rest::TripitClient;
pub use token::TokenResponse;
