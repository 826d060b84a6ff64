// src/models/status.rs
use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };
use crate::error::StatusError;
use crate::models::server::Game;

pub const OFFLINE_MESSAGE: &str = "Server is offline";
pub const ONLINE_MESSAGE: &str = "Server is online";

/// Normalized result of one probe.
///
/// Optional fields hold whatever the upstream server reported, so they are kept
/// as raw JSON values. Absent fields are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub game: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl StatusRecord {
    /// An online record with no game-specific fields filled in yet.
    pub fn online(game: Game) -> Self {
        Self {
            online: true,
            message: None,
            game: game.display_name().to_string(),
            players: None,
            max_players: None,
            ping: None,
            server_name: None,
            version: None,
            data: None,
        }
    }

    pub fn offline(game: Game) -> Self {
        Self {
            online: false,
            message: Some(OFFLINE_MESSAGE.to_string()),
            ..Self::online(game)
        }
    }

    /// The record as a JSON object keyed by the serialized field names.
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        }
    }

    /// Looks up a single field by its serialized name (`maxPlayers`, `serverName`, ...).
    pub fn field(&self, name: &str) -> Option<Value> {
        self.to_fields().remove(name)
    }
}

/// Per-query options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    /// Skip the cache and probe again.
    pub force: bool,
    pub select: Option<Vec<String>>,
    /// Return only this field's value. Takes precedence over `select`.
    pub return_type: Option<String>,
}

impl QueryOptions {
    pub fn forced() -> Self {
        Self { force: true, ..Self::default() }
    }

    pub fn with_select<I, S>(mut self, fields: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_return_type(mut self, field: impl Into<String>) -> Self {
        self.return_type = Some(field.into());
        self
    }

    /// Applies `returnType` / `select` to a resolved record.
    pub fn shape(&self, record: StatusRecord) -> Result<StatusOutput, StatusError> {
        // An empty `returnType` counts as unset.
        if let Some(field) = self.return_type.as_deref().filter(|field| !field.is_empty()) {
            return record
                .field(field)
                .map(StatusOutput::Field)
                .ok_or_else(|| StatusError::FieldUnavailable(field.to_string()));
        }

        if let Some(select) = &self.select {
            let mut fields = record.to_fields();
            let mut selected = Map::new();
            for name in select {
                if let Some(value) = fields.remove(name) {
                    selected.insert(name.clone(), value);
                }
            }
            return Ok(StatusOutput::Partial(selected));
        }

        Ok(StatusOutput::Record(record))
    }
}

/// What a status query hands back after shaping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusOutput {
    Record(StatusRecord),
    Partial(Map<String, Value>),
    Field(Value),
}

impl StatusOutput {
    pub fn as_record(&self) -> Option<&StatusRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<StatusRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// One line of a batch result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub ip: String,
    pub status: StatusOutput,
}
