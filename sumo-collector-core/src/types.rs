//! Domain types for the Sumo Logic collector API
//!
//! Collectors and sources keep every field the server sends; only `id` and
//! `name` are typed because lookups depend on them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Arbitrary source definition fields, as sent to the API
pub type SourceData = Map<String, Value>;

/// A collector registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    /// Server-assigned id
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Collector name (usually the host's node name)
    pub name: String,
    /// Remaining collector metadata
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A log source configured on a collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Server-assigned id, unique within the collector
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Source name
    pub name: String,
    /// Remaining source configuration
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Source {
    /// Etag embedded in the source body, when the server includes one
    pub fn etag(&self) -> Option<&str> {
        self.fields.get("etag").and_then(Value::as_str)
    }
}

/// Response from GET /collectors
#[derive(Debug, Deserialize)]
pub(crate) struct CollectorList {
    pub collectors: Vec<Collector>,
}

/// Response from GET /collectors/{id}/sources
#[derive(Debug, Deserialize)]
pub(crate) struct SourceList {
    pub sources: Vec<Source>,
}

/// Response from GET /collectors/{id}/sources/{sourceId}
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SourceDetail {
    Wrapped { source: Source },
    Bare(Source),
}

impl SourceDetail {
    pub fn into_source(self) -> Source {
        match self {
            SourceDetail::Wrapped { source } | SourceDetail::Bare(source) => source,
        }
    }
}

/// Request body for POST and PUT on sources
#[derive(Debug, Serialize)]
pub(crate) struct SourceEnvelope<'a> {
    pub source: &'a SourceData,
}

/// The API returns numeric ids; accept either form and keep strings.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collector_keeps_extra_fields() {
        let collector: Collector = serde_json::from_value(json!({
            "id": 101,
            "name": "web-01",
            "collectorType": "Installable",
            "alive": true
        }))
        .unwrap();

        assert_eq!(collector.id, "101");
        assert_eq!(collector.name, "web-01");
        assert_eq!(collector.extra["collectorType"], "Installable");
        assert_eq!(collector.extra["alive"], true);
    }

    #[test]
    fn test_source_string_id_and_etag() {
        let source: Source = serde_json::from_value(json!({
            "id": "7",
            "name": "syslog",
            "etag": "abc123",
            "sourceType": "LocalFile"
        }))
        .unwrap();

        assert_eq!(source.id, "7");
        assert_eq!(source.etag(), Some("abc123"));
        assert_eq!(source.fields["sourceType"], "LocalFile");
    }

    #[test]
    fn test_source_detail_with_and_without_envelope() {
        let wrapped: SourceDetail = serde_json::from_value(json!({
            "source": {"id": 3, "name": "audit", "etag": "w1"}
        }))
        .unwrap();
        assert_eq!(wrapped.into_source().etag(), Some("w1"));

        let bare: SourceDetail =
            serde_json::from_value(json!({"id": "3", "name": "audit"})).unwrap();
        let source = bare.into_source();
        assert_eq!(source.id, "3");
        assert_eq!(source.etag(), None);
    }

    #[test]
    fn test_source_envelope_shape() {
        let mut data = SourceData::new();
        data.insert("name".to_string(), json!("C"));
        let body = serde_json::to_value(SourceEnvelope { source: &data }).unwrap();
        assert_eq!(body, json!({"source": {"name": "C"}}));
    }
}
