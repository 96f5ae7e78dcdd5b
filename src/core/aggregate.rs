use crate::core::resolver::ResolvedConfig;
use crate::domain::model::SubscriptionSet;
use crate::utils::error::{Result, SubsError};

/// One pass over every resolved inbound model, vmess family first. A client
/// identity seen under several inbounds accumulates all of its links into a
/// single bundle, in resolution order.
pub fn generate_client_subs(resolved: &ResolvedConfig<'_>) -> Result<SubscriptionSet> {
    let mut subs = SubscriptionSet::new();

    for model in resolved.vmess.iter().chain(resolved.trojan.iter()) {
        for client in model.iter_clients() {
            let identity = client.identity.ok_or_else(|| SubsError::InvalidServerConfig {
                message: format!(
                    "client record under \"{}\" is missing its \"{}\" field",
                    model.tag(),
                    model.protocol().credential_field()
                ),
            })?;

            let link = model.encode(client.record)?;
            let bundle = subs.entry(identity);
            if let Some(verb) = client.verb {
                bundle.verb.insert(verb.to_string());
            }
            bundle.enc.push(link);
        }
    }

    Ok(subs)
}
