use std::fmt;

/// Parsed template tree. Object keys keep the order they appeared in the
/// source document, which fixes iteration order for everything downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    Scalar(Scalar),
    Array(Vec<DocumentValue>),
    Object(Vec<(String, DocumentValue)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl DocumentValue {
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        match self {
            DocumentValue::Object(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, DocumentValue)]> {
        match self {
            DocumentValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, DocumentValue::Array(_) | DocumentValue::Object(_))
    }
}

impl From<serde_json::Value> for DocumentValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DocumentValue::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => DocumentValue::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DocumentValue::Scalar(Scalar::Integer(i))
                } else {
                    DocumentValue::Scalar(Scalar::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => DocumentValue::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                DocumentValue::Array(items.into_iter().map(DocumentValue::from).collect())
            }
            serde_json::Value::Object(map) => DocumentValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, DocumentValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for DocumentValue {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => DocumentValue::Scalar(Scalar::Null),
            serde_yaml::Value::Bool(b) => DocumentValue::Scalar(Scalar::Bool(b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DocumentValue::Scalar(Scalar::Integer(i))
                } else {
                    DocumentValue::Scalar(Scalar::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_yaml::Value::String(s) => DocumentValue::Scalar(Scalar::String(s)),
            serde_yaml::Value::Sequence(items) => {
                DocumentValue::Array(items.into_iter().map(DocumentValue::from).collect())
            }
            serde_yaml::Value::Mapping(map) => DocumentValue::Object(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_to_string(&k), DocumentValue::from(v)))
                    .collect(),
            ),
            // Tagged values (e.g. !Ref shorthand) keep the inner value; the
            // tag itself carries no dependency information we consume.
            serde_yaml::Value::Tagged(tagged) => DocumentValue::from(tagged.value),
        }
    }
}

fn yaml_key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_preserves_key_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"Zeta": 1, "Alpha": 2, "Mid": 3}"#).unwrap();
        let doc = DocumentValue::from(json);
        let keys: Vec<&str> = doc
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn get_returns_nested_value() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"Resources": {"Bucket": {"Type": "S3"}}}"#).unwrap();
        let doc = DocumentValue::from(json);
        let bucket = doc.get("Resources").and_then(|r| r.get("Bucket")).unwrap();
        assert_eq!(bucket.get("Type").and_then(|v| v.as_str()), Some("S3"));
    }

    #[test]
    fn get_on_scalar_is_none() {
        let doc = DocumentValue::Scalar(Scalar::String("hello".to_string()));
        assert!(doc.get("anything").is_none());
    }

    #[test]
    fn yaml_converts_scalars_and_sequences() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("items:\n  - one\n  - 2\n  - true\n").unwrap();
        let doc = DocumentValue::from(yaml);
        match doc.get("items") {
            Some(DocumentValue::Array(items)) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].as_str(), Some("one"));
                assert_eq!(items[1], DocumentValue::Scalar(Scalar::Integer(2)));
                assert_eq!(items[2], DocumentValue::Scalar(Scalar::Bool(true)));
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn scalar_display_matches_source_text() {
        assert_eq!(Scalar::String("Bucket".to_string()).to_string(), "Bucket");
        assert_eq!(Scalar::Integer(7).to_string(), "7");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
    }
}
