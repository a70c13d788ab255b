#![cfg(feature = "uuid")]

use uuid::Uuid;

impl_automap_for_opaque!(Uuid, "Uuid");
