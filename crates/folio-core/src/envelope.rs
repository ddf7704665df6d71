//! Strapi response envelopes and their normalization.
//!
//! The content API wraps records in one of several shapes:
//!
//! - a bare array of records,
//! - `{ "data": [ ...records ] }`,
//! - `{ "data": record }`,
//!
//! and each record is either `{ "id", "attributes": { ...fields } }` (v4) or
//! flat `{ "id", ...fields }` (v5). [`ContentEnvelope`] classifies the shape
//! once at the boundary; [`normalize`] turns it into flat [`Entity`] values
//! that always carry an `id` and never carry `attributes`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::Result;

/// Key holding the nested field container of a v4 record.
const ATTRIBUTES: &str = "attributes";

/// Fallback identifier used by Strapi v5.
const DOCUMENT_ID: &str = "documentId";

/// The shape of a content API response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ContentEnvelope {
    /// A bare array of records.
    Bare(Vec<Value>),
    /// An object carrying the payload under `data`.
    Wrapped(Payload),
    /// Nothing extractable: no `data`, a falsy `data`, or a non-container body.
    Empty,
}

/// The payload found under a `data` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Many(Vec<Value>),
    One(Value),
}

impl From<Value> for ContentEnvelope {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(records) => Self::Bare(records),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(records)) => Self::Wrapped(Payload::Many(records)),
                Some(data) if is_truthy(&data) => Self::Wrapped(Payload::One(data)),
                _ => Self::Empty,
            },
            _ => Self::Empty,
        }
    }
}

/// Mirrors the API's notion of an absent payload: `null`, `false`, `0` and
/// `""` carry no record.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A flattened record: a field map that always contains `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    /// The record identifier (`null` when the record had none).
    #[must_use]
    pub fn id(&self) -> &Value {
        self.0.get("id").unwrap_or(&Value::Null)
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrow the underlying field map.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into the underlying JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserialize into a typed content model.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_value())?)
    }
}

/// Result of normalizing an envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    One(Entity),
    Many(Vec<Entity>),
}

impl Normalized {
    /// Collection view: a single record becomes a one-element list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Entity> {
        match self {
            Self::One(entity) => vec![entity],
            Self::Many(entities) => entities,
        }
    }

    /// Single-record view: the record, or the first of a collection.
    #[must_use]
    pub fn into_one(self) -> Option<Entity> {
        match self {
            Self::One(entity) => Some(entity),
            Self::Many(entities) => entities.into_iter().next(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(entities) => entities.len(),
        }
    }

    /// Whether no records were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize an envelope into flat entities.
#[must_use]
pub fn normalize(envelope: ContentEnvelope) -> Normalized {
    match envelope {
        ContentEnvelope::Bare(records) | ContentEnvelope::Wrapped(Payload::Many(records)) => {
            Normalized::Many(records.into_iter().map(flatten).collect())
        }
        ContentEnvelope::Wrapped(Payload::One(record)) => Normalized::One(flatten(record)),
        ContentEnvelope::Empty => Normalized::Many(Vec::new()),
    }
}

/// Normalize a raw response body.
#[must_use]
pub fn normalize_value(body: Value) -> Normalized {
    normalize(ContentEnvelope::from(body))
}

/// Flatten one record: lift `attributes` one level and settle the `id`.
///
/// The record-level `id`, then `documentId`, take precedence over an `id`
/// found inside the field container.
#[must_use]
pub fn flatten(record: Value) -> Entity {
    let mut record = match record {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let nested = match record.remove(ATTRIBUTES) {
        Some(Value::Object(attributes)) => Some(attributes),
        _ => None,
    };

    let id = [record.get("id"), record.get(DOCUMENT_ID)]
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .cloned();

    let mut fields = nested.unwrap_or(record);
    fields.remove(ATTRIBUTES);
    let id = id
        .or_else(|| fields.get("id").filter(|v| !v.is_null()).cloned())
        .unwrap_or(Value::Null);
    fields.insert("id".to_string(), id);

    Entity(fields)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn many(body: Value) -> Vec<Value> {
        normalize_value(body)
            .into_vec()
            .into_iter()
            .map(Entity::into_value)
            .collect()
    }

    #[test]
    fn test_empty_shapes() {
        assert!(normalize_value(json!([])).is_empty());
        assert!(normalize_value(json!({ "data": [] })).is_empty());
        assert!(normalize_value(json!({})).is_empty());
        assert!(normalize_value(json!({ "data": null })).is_empty());
        assert!(normalize_value(Value::Null).is_empty());
        assert!(normalize_value(json!("oops")).is_empty());
    }

    #[test]
    fn test_empty_is_a_collection() {
        assert_eq!(normalize_value(json!({})), Normalized::Many(Vec::new()));
    }

    #[test]
    fn test_single_record_with_attributes() {
        let result = normalize_value(json!({
            "data": { "id": 7, "attributes": { "title": "x" } }
        }));

        match result {
            Normalized::One(entity) => {
                assert_eq!(entity.into_value(), json!({ "id": 7, "title": "x" }));
            }
            other => panic!("expected a single entity, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_mixed_records_preserve_order() {
        let result = many(json!([
            { "id": 1, "attributes": { "a": 1 } },
            { "id": 2, "a": 2 }
        ]));

        assert_eq!(result, vec![json!({ "id": 1, "a": 1 }), json!({ "id": 2, "a": 2 })]);
    }

    #[test]
    fn test_wrapped_collection() {
        let result = many(json!({
            "data": [
                { "id": 3, "attributes": { "slug": "c" } },
                { "id": 1, "attributes": { "slug": "a" } },
                { "id": 2, "attributes": { "slug": "b" } }
            ],
            "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 1, "total": 3 } }
        }));

        let slugs: Vec<_> = result.iter().map(|e| e["slug"].clone()).collect();
        assert_eq!(slugs, vec![json!("c"), json!("a"), json!("b")]);
    }

    #[test]
    fn test_flat_records_unchanged() {
        let records = json!([
            { "id": 1, "title": "One", "techStack": ["rust"] },
            { "id": 2, "title": "Two", "techStack": [] }
        ]);

        let result = many(records.clone());
        assert_eq!(Value::Array(result), records);
    }

    #[test]
    fn test_record_id_wins_over_nested_id() {
        let entity = flatten(json!({ "id": 5, "attributes": { "id": 99, "name": "n" } }));
        assert_eq!(entity.id(), &json!(5));
        assert_eq!(entity.get("name"), Some(&json!("n")));
    }

    #[test]
    fn test_document_id_fallback() {
        let entity = flatten(json!({ "documentId": "abc123", "title": "t" }));
        assert_eq!(entity.id(), &json!("abc123"));
        assert_eq!(entity.get("documentId"), Some(&json!("abc123")));
    }

    #[test]
    fn test_nested_id_fallback() {
        let entity = flatten(json!({ "attributes": { "id": 42, "title": "t" } }));
        assert_eq!(entity.id(), &json!(42));
    }

    #[test]
    fn test_missing_id_is_null() {
        let entity = flatten(json!({ "title": "t" }));
        assert!(entity.fields().contains_key("id"));
        assert_eq!(entity.id(), &Value::Null);
    }

    #[test]
    fn test_never_keeps_attributes_key() {
        let nested = flatten(json!({ "id": 1, "attributes": { "attributes": 3, "x": 1 } }));
        let broken = flatten(json!({ "id": 2, "attributes": null, "x": 1 }));

        assert!(nested.get("attributes").is_none());
        assert_eq!(nested.get("x"), Some(&json!(1)));
        assert!(broken.get("attributes").is_none());
        assert_eq!(broken.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_non_object_record() {
        let result = many(json!([3, "x"]));
        assert_eq!(result, vec![json!({ "id": null }), json!({ "id": null })]);
    }

    #[test]
    fn test_into_one_from_collection() {
        let first = normalize_value(json!({ "data": [{ "id": 1 }, { "id": 2 }] })).into_one();
        assert_eq!(first.map(|e| e.id().clone()), Some(json!(1)));
        assert!(normalize_value(json!({})).into_one().is_none());
    }

    #[test]
    fn test_deserialize_envelope() {
        let envelope: ContentEnvelope =
            serde_json::from_str(r#"{"data":{"id":1,"attributes":{"a":true}}}"#).unwrap();
        assert!(matches!(envelope, ContentEnvelope::Wrapped(Payload::One(_))));
    }

    #[test]
    fn test_into_typed() {
        #[derive(Deserialize)]
        struct Named {
            id: u32,
            name: String,
        }

        let entity = flatten(json!({ "id": 4, "attributes": { "name": "four" } }));
        let named: Named = entity.into_typed().unwrap();
        assert_eq!(named.id, 4);
        assert_eq!(named.name, "four");
    }
}
