//! The declared record types.
//!
//! Plain data holders: every field is public, construction never fails and
//! nothing is validated. The JSON form uses the declared field names verbatim
//! (including `_core_type`), and [`Record`] tags each object with the GraphQL
//! `__typename` of the wrapped type.
use serde::{Deserialize, Serialize};

use crate::complex::{Complex, ParseComplexError};
use crate::shape::{self, RecordShape};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// This is my type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MyType {
    /// This is my real
    pub real: i64,
}

/// A constant segment of a complex-valued function of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplexSegment {
    /// The duration of the segment.
    pub duration: f64,
    /// The value taken by the function on this segment.
    pub value: String,
    /// The matching class in core.
    #[serde(rename = "_core_type")]
    pub core_type: String,
}

/// A constant segment of a complex-valued function of time.
///
/// Same layout as [`ComplexSegment`], kept as its own type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplexSegment22 {
    /// The duration of the segment.
    pub duration: f64,
    /// The value taken by the function on this segment.
    pub value: String,
    /// The matching class in core.
    #[serde(rename = "_core_type")]
    pub core_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct A {
    pub a_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct B {
    pub a: A,
    pub b_string: String,
}

/// Any declared record, tagged by `__typename` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Record {
    MyType(MyType),
    ComplexSegment(ComplexSegment),
    ComplexSegment22(ComplexSegment22),
    A(A),
    B(B),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl MyType {
    pub fn new(real: i64) -> Self {
        Self { real }
    }
}

impl ComplexSegment {
    pub fn new(duration: f64, value: impl Into<String>, core_type: impl Into<String>) -> Self {
        Self { duration, value: value.into(), core_type: core_type.into() }
    }
    /// Interpret `value` as a complex literal (`"1+2j"`, `"(0.5-1j)"`, ...).
    pub fn complex_value(&self) -> Result<Complex, ParseComplexError> {
        self.value.parse()
    }
}

impl ComplexSegment22 {
    pub fn new(duration: f64, value: impl Into<String>, core_type: impl Into<String>) -> Self {
        Self { duration, value: value.into(), core_type: core_type.into() }
    }
    pub fn complex_value(&self) -> Result<Complex, ParseComplexError> {
        self.value.parse()
    }
}

impl From<ComplexSegment> for ComplexSegment22 {
    fn from(s: ComplexSegment) -> Self {
        Self { duration: s.duration, value: s.value, core_type: s.core_type }
    }
}

impl From<ComplexSegment22> for ComplexSegment {
    fn from(s: ComplexSegment22) -> Self {
        Self { duration: s.duration, value: s.value, core_type: s.core_type }
    }
}

impl A {
    pub fn new(a_string: impl Into<String>) -> Self {
        Self { a_string: a_string.into() }
    }
}

impl B {
    pub fn new(a: A, b_string: impl Into<String>) -> Self {
        Self { a, b_string: b_string.into() }
    }
}

impl Record {
    /// Declared name of the wrapped record; also its `__typename`.
    pub fn typename(&self) -> &'static str {
        match self {
            Record::MyType(_) => "MyType",
            Record::ComplexSegment(_) => "ComplexSegment",
            Record::ComplexSegment22(_) => "ComplexSegment22",
            Record::A(_) => "A",
            Record::B(_) => "B",
        }
    }
    pub fn shape(&self) -> &'static RecordShape {
        match self {
            Record::MyType(_) => &shape::MY_TYPE,
            Record::ComplexSegment(_) => &shape::COMPLEX_SEGMENT,
            Record::ComplexSegment22(_) => &shape::COMPLEX_SEGMENT_22,
            Record::A(_) => &shape::A,
            Record::B(_) => &shape::B,
        }
    }
}

macro_rules! impl_into_record {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Record {
                fn from(x: $ty) -> Self { Record::$ty(x) }
            }
        )*
    };
}

impl_into_record!(MyType, ComplexSegment, ComplexSegment22, A, B);

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
