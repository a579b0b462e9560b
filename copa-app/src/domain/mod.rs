use chrono::{NaiveDateTime, SubsecRound, Utc};
use uuid::Uuid;

pub mod document;
pub mod ocr;
pub mod player;
pub mod team;
pub mod tournament;

/// Naive UTC timestamp, serialized as ISO-8601 without offset.
pub type Timestamp = NaiveDateTime;

/// Microsecond precision, the resolution the stored files carry.
pub fn now() -> Timestamp {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Serde adapter writing `YYYY-MM-DDTHH:MM:SS.ffffff`. Reading accepts any
/// fractional precision, or none.
pub mod timestamp {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::Timestamp;

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::from_str(&raw).map_err(D::Error::custom)
    }
}

/// Fresh opaque identifier. No collision check against stored records.
pub fn new_id() -> String {
    Uuid::new_v4().as_hyphenated().to_string()
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                $name(new_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

record_id!(PlayerId);
record_id!(TeamId);
record_id!(DocumentId);
record_id!(TournamentId);
record_id!(EnrollmentId);
