use crate::document::DocumentValue;

/// Keys whose presence anywhere in a resource body signals a dependency.
/// Order is priority order: the first key found in a resource's subtree is
/// the only one processed for that resource.
pub const MARKER_KEYS: [&str; 3] = ["Ref", "InstanceId", "DependsOn"];

/// Resource name to the ordered names it references. Entry order follows
/// the document's resource declaration order. Resources with no marker in
/// their body get no entry at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyMap {
    entries: Vec<(String, Vec<String>)>,
}

impl DependencyMap {
    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn get(&self, resource: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == resource)
            .map(|(_, deps)| deps.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct DependencyExtractor;

impl DependencyExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Walks the value tree rooted at the "Resources" mapping and returns a
    /// fresh DependencyMap. Resource bodies that are not mappings, or that
    /// contain none of the marker keys, are skipped.
    pub fn extract(&self, resources: &DocumentValue) -> DependencyMap {
        let mut map = DependencyMap::default();

        let Some(entries) = resources.as_object() else {
            return map;
        };

        for (name, body) in entries {
            // A body that is not a mapping cannot be searched for markers;
            // warn and move on rather than aborting the whole pass.
            if body.as_object().is_none() {
                eprintln!("  ✗ resource {} has a non-mapping body, skipping", name);
                continue;
            }
            if let Some(marker) = self.find_marker(body) {
                let mut collected = Vec::new();
                collect_marker_values(body, marker, &mut collected);

                let mut flat = Vec::new();
                for value in collected {
                    flatten_into(value, &mut flat);
                }

                map.entries.push((name.clone(), flat));
            }
        }

        map
    }

    /// First marker key present anywhere in the subtree, in priority order.
    /// A subtree holding both `Ref` and `DependsOn` reports `Ref` only.
    fn find_marker(&self, body: &DocumentValue) -> Option<&'static str> {
        MARKER_KEYS
            .iter()
            .find(|marker| contains_key(body, marker))
            .copied()
    }
}

impl Default for DependencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_key(value: &DocumentValue, key: &str) -> bool {
    match value {
        DocumentValue::Object(entries) => entries
            .iter()
            .any(|(k, v)| k == key || contains_key(v, key)),
        DocumentValue::Array(items) => items.iter().any(|v| contains_key(v, key)),
        DocumentValue::Scalar(_) => false,
    }
}

/// Collects every value bound to `key` at any depth, document order.
fn collect_marker_values<'a>(
    value: &'a DocumentValue,
    key: &str,
    out: &mut Vec<&'a DocumentValue>,
) {
    match value {
        DocumentValue::Object(entries) => {
            for (k, v) in entries {
                if k == key {
                    out.push(v);
                }
                collect_marker_values(v, key, out);
            }
        }
        DocumentValue::Array(items) => {
            for item in items {
                collect_marker_values(item, key, out);
            }
        }
        DocumentValue::Scalar(_) => {}
    }
}

/// Expands nested arrays depth-first, left to right, until only scalars
/// remain. Scalars are rendered to their text form; a mapping names no
/// single resource and contributes nothing.
fn flatten_into(value: &DocumentValue, out: &mut Vec<String>) {
    match value {
        DocumentValue::Scalar(s) => out.push(s.to_string()),
        DocumentValue::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        DocumentValue::Object(_) => {}
    }
}
