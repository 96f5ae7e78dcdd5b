use crate::config::domain_map::DomainMap;
use crate::config::server_config::ServerConfig;
use crate::core::inbound::{InboundModel, ProtocolKind};
use crate::utils::error::Result;

/// Inbound models grouped per protocol family, in source inbound order then
/// domain-map entry order. Aggregation walks vmess first, then trojan.
#[derive(Debug, Default)]
pub struct ResolvedConfig<'a> {
    pub vmess: Vec<InboundModel<'a>>,
    pub trojan: Vec<InboundModel<'a>>,
}

impl ResolvedConfig<'_> {
    pub fn model_count(&self) -> usize {
        self.vmess.len() + self.trojan.len()
    }
}

/// Cross-references the server config's inbounds against the domain map.
/// Unmatched tags and unknown protocols are expected filtering, not errors.
pub fn resolve<'a>(
    config: &'a ServerConfig,
    domain_map: &'a DomainMap,
) -> Result<ResolvedConfig<'a>> {
    let mut resolved = ResolvedConfig::default();

    for inbound in &config.inbounds {
        let Some(entries) = domain_map.get(&inbound.tag) else {
            tracing::debug!("inbound \"{}\" has no domain map entry, skipping", inbound.tag);
            continue;
        };
        let Some(protocol) = ProtocolKind::from_name(&inbound.protocol) else {
            tracing::debug!(
                "inbound \"{}\" protocol \"{}\" is not link-encodable, skipping",
                inbound.tag,
                inbound.protocol
            );
            continue;
        };

        for entry in entries {
            let model = InboundModel::new(protocol, inbound, entry)?;
            match protocol {
                ProtocolKind::Vmess => resolved.vmess.push(model),
                ProtocolKind::Trojan => resolved.trojan.push(model),
            }
        }
    }

    Ok(resolved)
}
