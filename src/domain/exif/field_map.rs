use serde::Serialize;
use std::collections::BTreeMap;

use super::tags::Tag;

/// Decoded primitive value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Multi-component rationals, e.g. a degrees/minutes/seconds triple
    Sequence(Vec<f64>),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            FieldValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// Round every numeric component to `places` decimals
    pub fn rounded(self, places: i32) -> Self {
        match self {
            FieldValue::Number(n) => FieldValue::Number(round_to(n, places)),
            FieldValue::Sequence(values) => {
                FieldValue::Sequence(values.into_iter().map(|v| round_to(v, places)).collect())
            }
            text => text,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Sequence(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Mapping from field to decoded value, built once per image
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: BTreeMap<Tag, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(tag, value)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<FieldValue> {
        self.fields.remove(&tag)
    }

    pub fn get(&self, tag: Tag) -> Option<&FieldValue> {
        self.fields.get(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.fields.contains_key(&tag)
    }

    pub fn number(&self, tag: Tag) -> Option<f64> {
        self.get(tag).and_then(FieldValue::as_number)
    }

    pub fn text(&self, tag: Tag) -> Option<&str> {
        self.get(tag).and_then(FieldValue::as_text)
    }

    /// Signed decimal (latitude, longitude), when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.number(Tag::GpsLatitude)?, self.number(Tag::GpsLongitude)?))
    }

    /// Merge `other` into `self`; fields in `other` win
    pub fn merge(&mut self, other: FieldMap) {
        self.fields.extend(other.fields);
    }

    /// Keep only the fields for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(Tag, &FieldValue) -> bool) {
        self.fields.retain(|tag, value| keep(*tag, value));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &FieldValue)> {
        self.fields.iter()
    }

    pub(crate) fn round_numbers(&mut self, places: i32) {
        let fields = std::mem::take(&mut self.fields);
        self.fields = fields
            .into_iter()
            .map(|(tag, value)| (tag, value.rounded(places)))
            .collect();
    }
}

impl FromIterator<(Tag, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (Tag, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldMap {
    type Item = (Tag, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<Tag, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
