//! Case files: the configuration that describes one mystery.
//!
//! A case names the mansion's rooms, how they connect, which clue sits in
//! each, and the seed table linking clues to suspects. Cases are plain JSON
//! so new mysteries can be written without touching code.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::suspects::{standard_associations, SuspectAssociation};

/// Errors from loading or validating a case.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Case has no rooms")]
    NoRooms,

    #[error("Room names must not be blank")]
    EmptyRoomName,

    #[error("Duplicate room: {0}")]
    DuplicateRoom(String),

    #[error("Entrance '{0}' is not a room in this case")]
    UnknownEntrance(String),

    #[error("Room '{from}' leads to unknown room '{to}'")]
    UnknownRoom { from: String, to: String },

    #[error("Room '{0}' is reachable by more than one path")]
    SharedRoom(String),

    #[error("Room '{0}' cannot be reached from the entrance")]
    UnreachableRoom(String),
}

/// One room as written in a case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,

    /// Name of the room to the left, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,

    /// Name of the room to the right, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl RoomSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clue: None,
            left: None,
            right: None,
        }
    }

    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = Some(clue.into());
        self
    }

    pub fn with_left(mut self, room: impl Into<String>) -> Self {
        self.left = Some(room.into());
        self
    }

    pub fn with_right(mut self, room: impl Into<String>) -> Self {
        self.right = Some(room.into());
        self
    }
}

/// A complete mystery: mansion layout plus clue→suspect associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    pub title: String,

    /// Name of the room where exploration starts.
    pub entrance: String,

    pub rooms: Vec<RoomSpec>,

    #[serde(default)]
    pub associations: Vec<SuspectAssociation>,
}

impl CaseFile {
    /// The built-in mansion, with its seven rooms and suspects.
    pub fn standard() -> Self {
        Self {
            title: "Detective Quest: Julgamento Final".to_string(),
            entrance: "Hall de Entrada".to_string(),
            rooms: vec![
                RoomSpec::new("Hall de Entrada")
                    .with_clue("pegadas_no_chao")
                    .with_left("Sala de Estar")
                    .with_right("Cozinha"),
                RoomSpec::new("Sala de Estar")
                    .with_clue("livro_aberto_sobre_enigmas")
                    .with_left("Biblioteca")
                    .with_right("Jardim"),
                RoomSpec::new("Cozinha")
                    .with_clue("faca_limpa_na_mesa")
                    .with_left("Porao")
                    .with_right("Quarto Principal"),
                RoomSpec::new("Biblioteca").with_clue("mapa_rasgado_com_x"),
                RoomSpec::new("Jardim").with_clue("vaso_quebrado"),
                RoomSpec::new("Porao").with_clue("cofre_trancado_com_simbolos"),
                RoomSpec::new("Quarto Principal").with_clue("retrato_antigo_quebrado"),
            ],
            associations: standard_associations(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CaseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CaseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a case from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CaseError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write this case to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CaseError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
