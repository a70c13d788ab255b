#![cfg(feature = "chrono")]

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

impl_automap_for_opaque!(DateTime<Utc>, "DateTime<Utc>");
impl_automap_for_opaque!(NaiveDateTime, "NaiveDateTime");
impl_automap_for_opaque!(NaiveDate, "NaiveDate");
impl_automap_for_opaque!(NaiveTime, "NaiveTime");
