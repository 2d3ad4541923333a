//! Material record types produced by the response parser.
//!
//! A [`MaterialRecordSet`] is built fresh per request and is immutable once
//! returned from the parser, except for the image enricher writing each
//! record's `image` field exactly once.

use serde::{Deserialize, Serialize};

/// An illustrative image for a material, or an explicit absence marker.
///
/// This is deliberately not an `Option`: "no image could be generated" is a
/// first-class outcome that the presentation layer renders, never a null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ImageRef {
    /// URL returned by the image-generation service.
    Url(String),
    /// No image is available for this record.
    Unavailable,
}

impl ImageRef {
    /// Whether an image URL is present.
    pub fn is_available(&self) -> bool {
        matches!(self, ImageRef::Url(_))
    }

    /// The URL, if one is present.
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageRef::Url(u) => Some(u.as_str()),
            ImageRef::Unavailable => None,
        }
    }
}

/// One recommended material, parsed from a paragraph block of the
/// generator's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Material name; never empty for an emitted record.
    pub name: String,
    /// Free-text properties, label prefix stripped.
    pub properties: String,
    /// Free-text advantages, label prefix stripped.
    pub pros: String,
    /// Free-text drawbacks; empty when the source block had no fourth line.
    pub cons: String,
    /// Illustrative image, filled in by the enricher.
    pub image: ImageRef,
}

impl MaterialRecord {
    /// Build a record with no image attached yet.
    pub fn new(name: String, properties: String, pros: String, cons: String) -> Self {
        Self {
            name,
            properties,
            pros,
            cons,
            image: ImageRef::Unavailable,
        }
    }
}

/// Ordered collection of parsed material records for one request.
///
/// Insertion order matches the order of paragraph blocks in the raw
/// response; the generator's own ranking is meaningful and must survive
/// enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecordSet {
    records: Vec<MaterialRecord>,
}

impl MaterialRecordSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, preserving encounter order.
    pub fn push(&mut self, record: MaterialRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaterialRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    /// Mutable access for the enricher; order must not be disturbed.
    pub(crate) fn records_mut(&mut self) -> &mut [MaterialRecord] {
        &mut self.records
    }
}

impl FromIterator<MaterialRecord> for MaterialRecordSet {
    fn from_iter<I: IntoIterator<Item = MaterialRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MaterialRecordSet {
    type Item = &'a MaterialRecord;
    type IntoIter = std::slice::Iter<'a, MaterialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
