use crate::config::domain_map::DomainMap;
use crate::config::server_config::ServerConfig;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Everything the extract phase reads from disk.
#[derive(Debug, Clone)]
pub struct SourceData {
    pub server_config: ServerConfig,
    pub domain_map: DomainMap,
}

/// One client's generated links plus every label observed for it. The link
/// sequence keeps insertion order; the verb set deduplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionBundle {
    pub verb: BTreeSet<String>,
    pub enc: Vec<String>,
}

/// Client identity → bundle, iterated in first-seen order so output files
/// are reproducible across runs.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    order: Vec<String>,
    bundles: HashMap<String, SubscriptionBundle>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, identity: &str) -> &mut SubscriptionBundle {
        if !self.bundles.contains_key(identity) {
            self.order.push(identity.to_string());
        }
        self.bundles.entry(identity.to_string()).or_default()
    }

    pub fn get(&self, identity: &str) -> Option<&SubscriptionBundle> {
        self.bundles.get(identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubscriptionBundle)> {
        self.order
            .iter()
            .map(|identity| (identity.as_str(), &self.bundles[identity]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
