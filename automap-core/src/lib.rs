#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

#[macro_use]
mod macros;

mod typeid;
pub use typeid::*;

mod shape;
pub use shape::*;

mod field;
pub use field::*;

mod kind;
pub use kind::*;

mod reflect;
pub use reflect::*;

// Implementations for `core`, `alloc` and `std` types
mod impls;

#[cfg(feature = "chrono")]
mod impls_chrono;

#[cfg(feature = "uuid")]
mod impls_uuid;
