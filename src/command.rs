use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TripitError};

pub const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
pub const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";

/// The action part of an API command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Delete,
    Replace,
    List,
    Create,
    RequestToken,
    AccessToken,
}

impl Verb {
    /// Path segment (or literal path, for the token endpoints)
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Delete => "delete",
            Verb::Replace => "replace",
            Verb::List => "list",
            Verb::Create => "create",
            Verb::RequestToken => REQUEST_TOKEN_PATH,
            Verb::AccessToken => ACCESS_TOKEN_PATH,
        }
    }

    /// Whether this verb addresses one of the OAuth token endpoints
    pub fn is_oauth_endpoint(&self) -> bool {
        matches!(self, Verb::RequestToken | Verb::AccessToken)
    }
}

impl FromStr for Verb {
    type Err = TripitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "get" => Ok(Verb::Get),
            "delete" => Ok(Verb::Delete),
            "replace" => Ok(Verb::Replace),
            "list" => Ok(Verb::List),
            "create" => Ok(Verb::Create),
            REQUEST_TOKEN_PATH => Ok(Verb::RequestToken),
            ACCESS_TOKEN_PATH => Ok(Verb::AccessToken),
            other => Err(TripitError::configuration(format!("unknown verb: {:?}", other))),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed command such as `get_trip` or `list_points_program`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub entity: Option<String>,
}

impl Command {
    pub fn new(verb: Verb, entity: Option<&str>) -> Self {
        Command {
            verb,
            entity: entity.map(str::to_string),
        }
    }

    /// Split a command name at the first `_` into verb and entity
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(TripitError::configuration("empty command name"));
        }

        // Token paths contain underscores of their own
        if name == REQUEST_TOKEN_PATH || name == ACCESS_TOKEN_PATH {
            return Ok(Command::new(name.parse()?, None));
        }

        let (verb, entity) = match name.split_once('_') {
            Some((verb, entity)) => (verb, Some(entity)),
            None => (name, None),
        };

        if entity == Some("") {
            return Err(TripitError::configuration(format!(
                "command {:?} has an empty entity",
                name
            )));
        }

        Ok(Command::new(verb.parse()?, entity))
    }

    /// Build the endpoint URL for this command
    ///
    /// `{root}{path}` for token endpoints, otherwise
    /// `{root}/{version}/{verb}[/{entity}]`.
    pub fn base_url(&self, api_root: &str, api_version: &str) -> String {
        if self.verb.is_oauth_endpoint() {
            return format!("{}{}", api_root, self.verb.as_str());
        }

        match &self.entity {
            Some(entity) => format!("{}/{}/{}/{}", api_root, api_version, self.verb, entity),
            None => format!("{}/{}/{}", api_root, api_version, self.verb),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            Some(entity) => write!(f, "{}_{}", self.verb, entity),
            None => write!(f, "{}", self.verb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_splits_at_first_separator() {
        let cmd = Command::parse("get_points_program").unwrap();
        assert_eq!(cmd.verb, Verb::Get);
        assert_eq!(cmd.entity.as_deref(), Some("points_program"));
    }

    #[test]
    fn test_parse_without_entity() {
        let cmd = Command::parse("create").unwrap();
        assert_eq!(cmd.verb, Verb::Create);
        assert_eq!(cmd.entity, None);
    }

    #[test]
    fn test_parse_token_paths() {
        let cmd = Command::parse("/oauth/request_token").unwrap();
        assert_eq!(cmd.verb, Verb::RequestToken);
        assert_eq!(cmd.entity, None);
    }

    #[test_case(""; "empty")]
    #[test_case("fetch_trip"; "unknown verb")]
    #[test_case("get_"; "empty entity")]
    #[test_case("_trip"; "empty verb")]
    fn test_parse_rejects(name: &str) {
        assert!(Command::parse(name).unwrap_err().is_configuration_error());
    }

    #[test_case("get_trip", "https://api.tripit.com/v1/get/trip")]
    #[test_case("get_profile", "https://api.tripit.com/v1/get/profile")]
    #[test_case("create", "https://api.tripit.com/v1/create")]
    #[test_case("list_points_program", "https://api.tripit.com/v1/list/points_program")]
    #[test_case("/oauth/request_token", "https://api.tripit.com/oauth/request_token")]
    #[test_case("/oauth/access_token", "https://api.tripit.com/oauth/access_token")]
    fn test_base_url(name: &str, expected: &str) {
        let cmd = Command::parse(name).unwrap();
        assert_eq!(cmd.base_url("https://api.tripit.com", "v1"), expected);
    }

    #[test]
    fn test_display_round_trips_name() {
        assert_eq!(Command::parse("delete_air").unwrap().to_string(), "delete_air");
    }
}
