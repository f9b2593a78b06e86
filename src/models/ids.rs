// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Opaque identifiers for projects, images and hotspots.
//!
//! Ids are random v4 UUIDs rendered in their compact form. Each entity kind
//! has its own newtype so a hotspot id can never be passed where an image id
//! is expected.

use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, process-unique id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a [`Project`](super::project::Project).
    ProjectId
);
opaque_id!(
    /// Identifier of a [`ProjectImage`](super::project::ProjectImage).
    ImageId
);
opaque_id!(
    /// Identifier of a [`Hotspot`](super::hotspot::Hotspot). Also used as the
    /// marker id handed to the viewer engine.
    HotspotId
);
