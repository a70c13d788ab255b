#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod error;
pub use error::*;

mod value;
pub use value::*;

mod update;
pub use update::*;

mod query;
pub use query::*;

mod dao;
pub use dao::*;

mod repository;
pub use repository::*;

mod memory;
pub use memory::*;

mod env;
pub use env::*;
