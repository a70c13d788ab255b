use core::time::Duration;

impl_automap_for_opaque!(Duration, "Duration");
