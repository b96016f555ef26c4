//! Numeric identifier newtypes.
//!
//! The inventory API hands out plain integers for items, locations, item
//! types and solar systems. Wrapping them keeps a station id from being
//! passed where a type id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Unique id of one inventory record.
    ItemId
);

numeric_id!(
    /// Id of a station or structure that ultimately holds items.
    StationId
);

numeric_id!(
    /// Id of an item type in the static catalog.
    TypeId
);

numeric_id!(
    /// Id of a solar system.
    SystemId
);
