use serde::{Deserialize, Serialize};

/// Declared type of a layer attribute field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Int,
    Double,
    Text,
}

/// One entry in a layer's field schema. The schema is owned once by the
/// layer; features carry only their value arrays, positionally matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A single attribute value. `Null` stands for an unset field, which file
/// readers produce for sparse records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldValue {
    Int { value: i64 },
    Double { value: f64 },
    Text { value: String },
    Null,
}

impl FieldValue {
    /// True if this value's runtime type matches the declared field kind.
    /// `Null` matches any kind.
    pub fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Int { .. }, FieldKind::Int)
                | (Self::Double { .. }, FieldKind::Double)
                | (Self::Text { .. }, FieldKind::Text)
                | (Self::Null, _)
        )
    }
}
