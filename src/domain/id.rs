//! Identifiers for projects and tasks
//!
//! ID Format:
//! - Project IDs: `p-{10-char-hash}` (e.g., `p-7f2b4c1e9a`)
//! - Task IDs: `t-{10-char-hash}` (e.g., `t-9d3e5f20b4`)
//!
//! Hash is derived from the name, the creation timestamp and a process-wide
//! sequence number, so two entities created with the same name in the same
//! nanosecond still get different IDs.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hex characters in the hash portion of an ID
const HASH_LEN: usize = 10;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid project ID format: expected 'p-{{10-char-hash}}', got '{0}'")]
    InvalidProjectId(String),

    #[error("Invalid task ID format: expected 't-{{10-char-hash}}', got '{0}'")]
    InvalidTaskId(String),
}

/// Generates a hash from name, timestamp and the next sequence number
fn generate_hash(name: &str, timestamp: DateTime<Utc>) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let input = format!(
        "{}{}{}",
        name,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        seq
    );
    let hash = blake3::hash(input.as_bytes());
    hash.to_hex()[..HASH_LEN].to_string()
}

fn is_valid_hash(hash: &str) -> bool {
    hash.len() == HASH_LEN && hash.chars().all(|c| c.is_ascii_hexdigit())
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $err:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name {
            hash: String,
        }

        impl $name {
            /// Creates a new ID from a name and creation timestamp
            pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
                Self {
                    hash: generate_hash(name, timestamp),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.hash)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                match s.strip_prefix($prefix) {
                    Some(hash) if is_valid_hash(hash) => Ok(Self {
                        hash: hash.to_ascii_lowercase(),
                    }),
                    _ => Err(IdError::$err(s.to_string())),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

entity_id!(
    /// Project ID in the format `p-{10-char-hash}`
    ProjectId,
    "p-",
    InvalidProjectId
);

entity_id!(
    /// Task ID in the format `t-{10-char-hash}`
    TaskId,
    "t-",
    InvalidTaskId
);
