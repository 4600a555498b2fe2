//! Typed records for the `MyType`, `ComplexSegment`, `ComplexSegment22`, `A`
//! and `B` dataclasses, with JSON decoding and shape introspection.
pub mod cli;
pub mod complex;
pub mod error;
pub mod jq_exec;
pub mod load;
pub mod path_de;
pub mod records;
pub mod shape;

pub use complex::Complex;
pub use error::{DecodeError, LoadError, ParseComplexError};
pub use records::{A, B, ComplexSegment, ComplexSegment22, MyType, Record};
