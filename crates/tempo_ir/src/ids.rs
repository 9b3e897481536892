//! Opaque ID newtypes for IR entities.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

/// Defines a `u32`-backed opaque ID type implementing [`ArenaId`].
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl $crate::arena::ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// ID of a statement inside its owning process's arena.
    ///
    /// Only meaningful relative to that arena; a cloned process carries the
    /// same IDs over its cloned arena.
    StmtId
);
