use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Opaque identifiers
// ============================================================================

/// Generates a UUID-backed identifier newtype.
///
/// Ids are opaque to callers: they are handed out by the aggregator and
/// only ever compared, hashed, printed, or parsed back from a string.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a suite, unique within a run.
    SuiteId
);

uuid_id!(
    /// Identifier of a test case, unique within a run.
    TestCaseId
);

uuid_id!(
    /// Identifier of one finalized report.
    RunId
);

/// Fresh id for entities that are never looked up (steps, events).
pub(crate) fn entry_id() -> String {
    Uuid::new_v4().to_string()
}
