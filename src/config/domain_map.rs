use crate::core::endpoint::Endpoint;
use crate::utils::error::{Result, SubsError};
use serde::Deserialize;
use std::collections::HashMap;

/// Mapping from inbound tag to the public endpoints it is reachable through.
pub type DomainMap = HashMap<String, Vec<DomainMapEntry>>;

#[derive(Debug, Clone, Deserialize)]
struct RawDomainEntry {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    sni: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainMapEntry {
    pub target: Endpoint,
    pub sni: Option<String>,
    pub tag: String,
}

impl DomainMapEntry {
    fn from_raw(key: &str, index: usize, raw: RawDomainEntry) -> Result<Self> {
        let target = raw.target.ok_or_else(|| SubsError::InvalidDomainMap {
            message: format!("entry {} under \"{}\" is missing its target", index, key),
        })?;
        let target = Endpoint::parse(&target)?;

        // The suffix check is "field absent", not "field empty": an explicit
        // empty-string tag suppresses the suffix yet still falls back to the
        // key, so duplicate "" tags collide. Known quirk, kept as-is.
        let suffix = if index > 0 && raw.tag.is_none() {
            format!("__{}", index)
        } else {
            String::new()
        };
        let base = match raw.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag,
            _ => key,
        };

        Ok(Self {
            target,
            sni: raw.sni,
            tag: format!("{}{}", base, suffix),
        })
    }
}

pub fn load_domain_map(raw: &[u8]) -> Result<DomainMap> {
    let parsed: HashMap<String, Vec<RawDomainEntry>> = serde_json::from_slice(raw)?;

    let mut map = DomainMap::with_capacity(parsed.len());
    for (key, entries) in parsed {
        let mut resolved = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            resolved.push(DomainMapEntry::from_raw(&key, index, entry)?);
        }
        map.insert(key, resolved);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(raw: &str) -> DomainMap {
        load_domain_map(raw.as_bytes()).unwrap()
    }

    #[test]
    fn first_entry_keeps_the_key_as_tag() {
        let map = load(r#"{"in1": [{"target": "http://10.0.0.1"}]}"#);
        assert_eq!(map["in1"][0].tag, "in1");
    }

    #[test]
    fn later_entries_get_an_index_suffix() {
        let map = load(
            r#"{"in1": [
                {"target": "http://10.0.0.1"},
                {"target": "http://10.0.0.2"},
                {"target": "http://10.0.0.3"}
            ]}"#,
        );
        let tags: Vec<&str> = map["in1"].iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["in1", "in1__1", "in1__2"]);
    }

    #[test]
    fn explicit_tag_suppresses_the_suffix() {
        let map = load(
            r#"{"in1": [
                {"target": "http://10.0.0.1"},
                {"target": "http://10.0.0.2", "tag": "backup"}
            ]}"#,
        );
        assert_eq!(map["in1"][1].tag, "backup");
    }

    #[test]
    fn empty_explicit_tag_still_suppresses_the_suffix() {
        // Quirk preserved from the tag defaulting rule: "" counts as set for
        // the suffix but falls back to the key for the name.
        let map = load(
            r#"{"in1": [
                {"target": "http://10.0.0.1"},
                {"target": "http://10.0.0.2", "tag": ""}
            ]}"#,
        );
        assert_eq!(map["in1"][1].tag, "in1");
    }

    #[test]
    fn sni_is_passed_through() {
        let map = load(r#"{"in1": [{"target": "http://10.0.0.1", "sni": "sni.example.com"}]}"#);
        assert_eq!(map["in1"][0].sni.as_deref(), Some("sni.example.com"));
    }

    #[test]
    fn missing_target_is_an_invalid_domain_map() {
        let err = load_domain_map(br#"{"in1": [{"sni": "sni.example.com"}]}"#).unwrap_err();
        assert!(matches!(err, SubsError::InvalidDomainMap { .. }));
    }

    #[test]
    fn unparsable_target_is_a_malformed_endpoint() {
        let err = load_domain_map(br#"{"in1": [{"target": ":443"}]}"#).unwrap_err();
        assert!(matches!(err, SubsError::MalformedEndpoint { .. }));
    }
}
