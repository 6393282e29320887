use std::fmt;
use std::str::FromStr;

use crate::command::{Command, Verb};
use crate::error::{Result, TripitError};
use crate::params::{ParamValue, Params};
use crate::response::{Format, Response};
use crate::rest::TripitClient;

/// A TripIt resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Trip,
    Air,
    Lodging,
    Car,
    Rail,
    Transport,
    Cruise,
    Restaurant,
    Activity,
    Note,
    Map,
    Directions,
    PointsProgram,
    Profile,
    Object,
}

const GET_DELETE_REPLACE: &[Verb] = &[Verb::Get, Verb::Delete, Verb::Replace];

/// Entity name and the verbs it supports
///
/// Every façade operation (`get_trip`, `delete_air`, `list_points_program`,
/// ...) is checked against this table before a request is built.
pub static ENTITIES: &[(Entity, &str, &[Verb])] = &[
    (Entity::Trip, "trip", &[Verb::Get, Verb::Delete, Verb::Replace, Verb::List]),
    (Entity::Air, "air", GET_DELETE_REPLACE),
    (Entity::Lodging, "lodging", GET_DELETE_REPLACE),
    (Entity::Car, "car", GET_DELETE_REPLACE),
    (Entity::Rail, "rail", GET_DELETE_REPLACE),
    (Entity::Transport, "transport", GET_DELETE_REPLACE),
    (Entity::Cruise, "cruise", GET_DELETE_REPLACE),
    (Entity::Restaurant, "restaurant", GET_DELETE_REPLACE),
    (Entity::Activity, "activity", GET_DELETE_REPLACE),
    (Entity::Note, "note", GET_DELETE_REPLACE),
    (Entity::Map, "map", GET_DELETE_REPLACE),
    (Entity::Directions, "directions", GET_DELETE_REPLACE),
    (Entity::PointsProgram, "points_program", &[Verb::Get, Verb::List]),
    (Entity::Profile, "profile", &[Verb::Get]),
    (Entity::Object, "object", &[Verb::List]),
];

impl Entity {
    /// Name used in URLs and command names
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Trip => "trip",
            Entity::Air => "air",
            Entity::Lodging => "lodging",
            Entity::Car => "car",
            Entity::Rail => "rail",
            Entity::Transport => "transport",
            Entity::Cruise => "cruise",
            Entity::Restaurant => "restaurant",
            Entity::Activity => "activity",
            Entity::Note => "note",
            Entity::Map => "map",
            Entity::Directions => "directions",
            Entity::PointsProgram => "points_program",
            Entity::Profile => "profile",
            Entity::Object => "object",
        }
    }

    pub fn supports(&self, verb: Verb) -> bool {
        ENTITIES
            .iter()
            .any(|(entity, _, verbs)| entity == self && verbs.contains(&verb))
    }
}

impl FromStr for Entity {
    type Err = TripitError;

    fn from_str(s: &str) -> Result<Self> {
        ENTITIES
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(entity, _, _)| *entity)
            .ok_or_else(|| TripitError::configuration(format!("unknown entity: {:?}", s)))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TripitClient {
    /// Fetch one object by id, e.g. `get(Entity::Trip, 1001, None)`
    ///
    /// `filter` is sent as query arguments; include `format=json` to get
    /// a JSON response. The profile has no id: use [`Self::get_profile`].
    pub fn get(
        &self,
        entity: Entity,
        id: impl fmt::Display,
        filter: Option<&Params>,
    ) -> Result<Response> {
        if entity == Entity::Profile {
            return Err(TripitError::configuration(
                "profile is not fetched by id, use get_profile",
            ));
        }
        let args = with_id(filter, &id);
        self.entity_request(Verb::Get, Some(entity), Some(&args), None)
    }

    /// Fetch the authenticated user's profile
    pub fn get_profile(&self, filter: Option<&Params>) -> Result<Response> {
        self.entity_request(Verb::Get, Some(Entity::Profile), filter, None)
    }

    /// Delete one object by id
    pub fn delete(
        &self,
        entity: Entity,
        id: impl fmt::Display,
        filter: Option<&Params>,
    ) -> Result<Response> {
        let args = with_id(filter, &id);
        self.entity_request(Verb::Delete, Some(entity), Some(&args), None)
    }

    /// Replace one object with a new document
    ///
    /// `data` is the serialized object in `format`.
    pub fn replace(
        &self,
        entity: Entity,
        id: impl fmt::Display,
        data: &str,
        format: Format,
    ) -> Result<Response> {
        let mut args = Params::new();
        args.insert("id".to_string(), ParamValue::Single(id.to_string()));
        insert_document(&mut args, data, format);
        self.entity_request(Verb::Replace, Some(entity), None, Some(&args))
    }

    /// List objects, e.g. `list(Entity::Trip, Some(&params! { "past" => "true" }))`
    pub fn list(&self, entity: Entity, filter: Option<&Params>) -> Result<Response> {
        self.entity_request(Verb::List, Some(entity), filter, None)
    }

    /// Create objects from a document in `format`
    pub fn create(&self, data: &str, format: Format) -> Result<Response> {
        let mut args = Params::new();
        insert_document(&mut args, data, format);
        self.entity_request(Verb::Create, None, None, Some(&args))
    }

    fn entity_request(
        &self,
        verb: Verb,
        entity: Option<Entity>,
        url_args: Option<&Params>,
        post_args: Option<&Params>,
    ) -> Result<Response> {
        if let Some(entity) = entity {
            if !entity.supports(verb) {
                return Err(TripitError::configuration(format!(
                    "{} is not supported for {}",
                    verb, entity
                )));
            }
        }

        let command = Command::new(verb, entity.map(|e| e.as_str()));
        self.execute(&command, url_args, post_args)
    }
}

fn with_id(filter: Option<&Params>, id: &dyn fmt::Display) -> Params {
    let mut args = filter.cloned().unwrap_or_default();
    args.insert("id".to_string(), ParamValue::Single(id.to_string()));
    args
}

fn insert_document(args: &mut Params, data: &str, format: Format) {
    args.insert("format".to_string(), format.as_str().into());
    args.insert(format.as_str().to_string(), data.into());
}
