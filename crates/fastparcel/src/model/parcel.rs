//! The parcel record: participants, commercial attributes, status, and the
//! append-only status history.

use super::UserId;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Internal identifier for parcels (24 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelId(pub String);

impl Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five parcel states. `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParcelStatus {
    Pending,
    Picked,
    InTransit,
    Delivered,
    Cancelled,
}

impl ParcelStatus {
    /// Terminal parcels accept no further status changes.
    pub fn is_terminal(self) -> bool {
        matches!(self, ParcelStatus::Delivered | ParcelStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParcelStatus::Pending => "pending",
            ParcelStatus::Picked => "picked",
            ParcelStatus::InTransit => "in-transit",
            ParcelStatus::Delivered => "delivered",
            ParcelStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelStatus {
    type Err = String;

    /// Only the five known values are accepted; anything else is a
    /// validation error at the boundary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ParcelStatus::Pending),
            "picked" => Ok(ParcelStatus::Picked),
            "in-transit" => Ok(ParcelStatus::InTransit),
            "delivered" => Ok(ParcelStatus::Delivered),
            "cancelled" => Ok(ParcelStatus::Cancelled),
            other => Err(format!("unknown parcel status: {other}")),
        }
    }
}

/// One entry of the append-only audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: ParcelStatus,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

/// Sender participant, captured at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderInfo {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

/// Receiver participant. Name and address are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// The central entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: ParcelId,
    /// Public, human-facing tracking code (`TRK-482913XJ4`).
    pub tracking_id: String,
    pub sender_info: SenderInfo,
    pub receiver_info: ReceiverInfo,
    pub description: String,
    pub weight: f64,
    pub cost: f64,
    /// The creating user. Immutable after creation.
    pub customer_id: UserId,
    /// Assigned delivery agent, if any. Mutable by admins only.
    pub assigned_agent_id: Option<UserId>,
    pub status: ParcelStatus,
    /// Append-only; the latest entry's status always equals `status`.
    pub status_history: Vec<StatusEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload handed to the parcel store. Field defaulting (sender
/// info from the customer profile, `"N/A"` phones) happens in the lifecycle
/// service before the draft is built.
#[derive(Debug, Clone)]
pub struct ParcelDraft {
    pub sender: SenderInfo,
    pub receiver: ReceiverInfo,
    pub description: String,
    pub weight: f64,
    pub cost: f64,
    pub customer_id: UserId,
}

impl Parcel {
    /// Records a status change: sets the status field and appends the
    /// matching history entry in one step, keeping the two in lockstep.
    pub fn record_status(&mut self, status: ParcelStatus, note: Option<String>) {
        let now = Utc::now();
        self.status = status;
        self.status_history.push(StatusEntry {
            status,
            note: note.unwrap_or_else(|| format!("Status updated to {status}")),
            timestamp: now,
        });
        self.updated_at = now;
    }

    /// Records an agent (re)assignment. The status is unchanged; the
    /// history entry carries the current status and an assignment note.
    pub fn record_assignment(&mut self, agent: Option<UserId>) {
        let now = Utc::now();
        let note = if agent.is_some() {
            "New agent assigned"
        } else {
            "Agent removed"
        };
        self.assigned_agent_id = agent;
        self.status_history.push(StatusEntry {
            status: self.status,
            note: note.to_string(),
            timestamp: now,
        });
        self.updated_at = now;
    }
}

/// Generates a tracking code: literal `TRK-`, the last 6 digits of the
/// current millisecond timestamp, and 3 random uppercase base-36
/// characters. Uniqueness within a store is guaranteed by the store's
/// insert-time conflict check, not by this generator.
pub fn generate_tracking_code() -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let millis = Utc::now().timestamp_millis().to_string();
    let time_suffix = &millis[millis.len() - 6..];
    let mut rng = rand::thread_rng();
    let random_suffix: String = (0..3)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("TRK-{time_suffix}{random_suffix}")
}

/// A lookup key presented through the single `idOrCode` input slot,
/// split into its two key spaces by a format predicate: exactly 24 hex
/// characters is ID-shaped, anything else is a tracking code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ById(ParcelId),
    ByCode(String),
}

impl Lookup {
    pub fn parse(raw: &str) -> Self {
        if super::looks_like_object_id(raw) {
            Lookup::ById(ParcelId(raw.to_string()))
        } else {
            Lookup::ByCode(raw.to_string())
        }
    }
}

/// Format check for tracking codes: `TRK-` + 6 digits + 3 chars of
/// `[A-Z0-9]`.
pub fn is_tracking_code(code: &str) -> bool {
    let Some(rest) = code.strip_prefix("TRK-") else {
        return false;
    };
    rest.len() == 9
        && rest[..6].chars().all(|c| c.is_ascii_digit())
        && rest[6..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
