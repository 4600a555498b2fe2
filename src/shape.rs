//! Static descriptions of the declared records: name, docstring and the
//! declared fields with their comments, in declaration order.
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    String,
    /// Another declared record, held by value.
    #[serde(untagged)]
    Record(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldShape {
    /// Wire name (JSON member / dataclass attribute).
    pub name: &'static str,
    pub ty: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordShape {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<&'static str>,
    pub fields: &'static [FieldShape],
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARED SHAPES
// ————————————————————————————————————————————————————————————————————————————

const fn field(name: &'static str, ty: FieldType, doc: Option<&'static str>) -> FieldShape {
    FieldShape { name, ty, doc }
}

const SEGMENT_FIELDS: &[FieldShape] = &[
    field("duration", FieldType::Float, Some("The duration of the segment.")),
    field("value", FieldType::String, Some("The value taken by the function on this segment.")),
    field("_core_type", FieldType::String, Some("The matching class in core.")),
];

const SEGMENT_DOC: Option<&str> = Some("A constant segment of a complex-valued function of time.");

pub static MY_TYPE: RecordShape = RecordShape {
    name: "MyType",
    doc: Some("This is my type"),
    fields: &[field("real", FieldType::Integer, Some("This is my real"))],
};

pub static COMPLEX_SEGMENT: RecordShape = RecordShape {
    name: "ComplexSegment",
    doc: SEGMENT_DOC,
    fields: SEGMENT_FIELDS,
};

pub static COMPLEX_SEGMENT_22: RecordShape = RecordShape {
    name: "ComplexSegment22",
    doc: SEGMENT_DOC,
    fields: SEGMENT_FIELDS,
};

pub static A: RecordShape = RecordShape {
    name: "A",
    doc: None,
    fields: &[field("a_string", FieldType::String, None)],
};

pub static B: RecordShape = RecordShape {
    name: "B",
    doc: None,
    fields: &[
        field("a", FieldType::Record("A"), None),
        field("b_string", FieldType::String, None),
    ],
};

// ————————————————————————————————————————————————————————————————————————————
// LOOKUP
// ————————————————————————————————————————————————————————————————————————————

/// All declared shapes, in declaration order.
pub fn shapes() -> [&'static RecordShape; 5] {
    [&MY_TYPE, &COMPLEX_SEGMENT, &COMPLEX_SEGMENT_22, &A, &B]
}

pub fn shape_of(name: &str) -> Option<&'static RecordShape> {
    shapes().into_iter().find(|s| s.name == name)
}

impl RecordShape {
    pub fn field(&self, name: &str) -> Option<&'static FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// JSON view keyed by record name, preserving the given order.
pub fn emit_shapes<'a>(shapes: impl IntoIterator<Item = &'a RecordShape>) -> Value {
    let mut out = IndexMap::<&str, Value>::new();
    for s in shapes {
        let fields = s
            .fields
            .iter()
            .map(|f| (f.name, f))
            .collect::<IndexMap<_, _>>();
        let mut entry = json!({ "fields": fields });
        if let Some(doc) = s.doc {
            entry["doc"] = Value::String(doc.to_string());
        }
        out.insert(s.name, entry);
    }
    json!(out)
}
