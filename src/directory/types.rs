use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Shown in place of the city when the record carries none.
pub const UNKNOWN_CITY: &str = "Unknown City";

/// One user as returned by the upstream API. Only the fields rendered on a card
/// are kept; anything else in the payload is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
}

impl UserRecord {
    /// City of the record, or [`UNKNOWN_CITY`] when the address or city is absent.
    #[must_use]
    pub fn city_or_default(&self) -> &str {
        self.address
            .as_ref()
            .and_then(|address| address.city.as_deref())
            .unwrap_or(UNKNOWN_CITY)
    }
}

/// Fields projected from a [`UserRecord`] for a single render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView<'a> {
    pub initials: String,
    pub name: &'a str,
    pub email: &'a str,
    pub city: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The single status value shown to the user; every transition overwrites it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Where a page stands in the fetch/render cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

impl From<StatusKind> for Phase {
    fn from(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Loading => Self::Loading,
            StatusKind::Success => Self::Success,
            StatusKind::Error => Self::Error,
        }
    }
}
