//! Domain records and value types.

pub mod parcel;
pub mod user;

pub use parcel::{
    generate_tracking_code, is_tracking_code, Lookup, Parcel, ParcelDraft, ParcelId, ParcelStatus,
    ReceiverInfo, SenderInfo, StatusEntry,
};
pub use user::{AccountStatus, Role, User, UserDraft, UserId};

use rand::Rng;

/// Generates a 24-character hexadecimal record identifier: 4 big-endian
/// bytes of the current unix time followed by 8 random bytes. Sorting the
/// raw bytes roughly follows creation time.
pub fn object_id() -> String {
    let secs = chrono::Utc::now().timestamp() as u32;
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    rand::thread_rng().fill(&mut bytes[4..]);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Whether an opaque lookup key has the shape of a record identifier
/// (exactly 24 hex characters). Anything else is treated as a tracking code.
pub fn looks_like_object_id(key: &str) -> bool {
    key.len() == 24 && key.chars().all(|c| c.is_ascii_hexdigit())
}
