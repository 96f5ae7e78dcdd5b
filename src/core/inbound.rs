use crate::config::domain_map::DomainMapEntry;
use crate::config::server_config::Inbound;
use crate::core::endpoint::Endpoint;
use crate::core::transport::{TlsSettings, TransportSettings};
use crate::utils::error::{Result, SubsError};
use base64::Engine as _;
use serde_json::Value;
use url::Url;

/// The two protocol families a link can be generated for. Anything else in
/// the server config is skipped during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    Vmess,
    Trojan,
}

impl ProtocolKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vmess" => Some(ProtocolKind::Vmess),
            "trojan" => Some(ProtocolKind::Trojan),
            _ => None,
        }
    }

    pub fn scheme(self) -> &'static str {
        match self {
            ProtocolKind::Vmess => "vmess",
            ProtocolKind::Trojan => "trojan",
        }
    }

    /// Field holding the client's identity inside its credential record.
    pub fn credential_field(self) -> &'static str {
        match self {
            ProtocolKind::Vmess => "id",
            ProtocolKind::Trojan => "password",
        }
    }

    /// Human-readable label field; same for both families.
    pub fn verb_field(self) -> &'static str {
        "email"
    }
}

/// One client credential record as seen during iteration. The record itself
/// is the untouched source JSON.
#[derive(Debug, Clone, Copy)]
pub struct ClientEntry<'a> {
    pub identity: Option<&'a str>,
    pub verb: Option<&'a str>,
    pub record: &'a Value,
}

/// One inbound listener bound to one public endpoint. An inbound matching
/// three domain-map entries produces three models sharing the same client
/// slice but differing in endpoint, tag, and SNI.
#[derive(Debug, Clone)]
pub struct InboundModel<'a> {
    protocol: ProtocolKind,
    endpoint: Endpoint,
    transport: TransportSettings,
    tls: TlsSettings,
    tag: String,
    clients: &'a [Value],
}

impl<'a> InboundModel<'a> {
    pub fn new(
        protocol: ProtocolKind,
        inbound: &'a Inbound,
        entry: &DomainMapEntry,
    ) -> Result<Self> {
        let transport = TransportSettings::from_stream(&inbound.stream_settings)?;

        // 域名映射的 sni 優先；否則只有 https URL 目標才回退到主機名
        let sni = entry
            .sni
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| entry.target.default_sni())
            .map(str::to_string);
        let tls = TlsSettings::new(sni);

        let clients = inbound
            .settings
            .get("clients")
            .and_then(Value::as_array)
            .ok_or_else(|| SubsError::InvalidServerConfig {
                message: format!("inbound \"{}\" has no settings.clients list", inbound.tag),
            })?;

        Ok(Self {
            protocol,
            endpoint: entry.target.clone(),
            transport,
            tls,
            tag: entry.tag.clone(),
            clients,
        })
    }

    pub fn protocol(&self) -> ProtocolKind {
        self.protocol
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Restartable iteration over the source client records.
    pub fn iter_clients(&self) -> impl Iterator<Item = ClientEntry<'a>> + '_ {
        self.clients.iter().map(move |record| ClientEntry {
            identity: record
                .get(self.protocol.credential_field())
                .and_then(Value::as_str),
            verb: record.get(self.protocol.verb_field()).and_then(Value::as_str),
            record,
        })
    }

    pub fn encode(&self, client: &Value) -> Result<String> {
        match self.protocol {
            ProtocolKind::Trojan => self.encode_trojan(client),
            ProtocolKind::Vmess => self.encode_vmess(client),
        }
    }

    fn credential<'c>(&self, client: &'c Value) -> Result<&'c str> {
        let field = self.protocol.credential_field();
        client
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| SubsError::InvalidServerConfig {
                message: format!(
                    "client record under \"{}\" is missing its \"{}\" field",
                    self.tag, field
                ),
            })
    }

    /// trojan://<secret>@<host>:<port>?<query>#<tag>, where the query is the
    /// transport native view followed by the TLS native view.
    fn encode_trojan(&self, client: &Value) -> Result<String> {
        let password = self.credential(client)?;

        let mut link = Url::parse(&format!(
            "{}://{}:{}",
            self.protocol.scheme(),
            self.endpoint.host(),
            self.endpoint.port()
        ))?;
        link.set_username(password)
            .map_err(|_| SubsError::EncodingError {
                message: format!("cannot attach credential to host {}", self.endpoint.host()),
            })?;

        let mut query = self.transport.native_view();
        query.extend(self.tls.native_view());
        {
            let mut pairs = link.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        link.set_fragment(Some(&self.tag));

        Ok(link.to_string())
    }

    /// vmess://<base64(JSON)>. Payload key order is fixed: add, port, id,
    /// ps, v, then the transport generic view, then the TLS generic view.
    fn encode_vmess(&self, client: &Value) -> Result<String> {
        let id = self.credential(client)?;

        let mut payload = serde_json::Map::new();
        payload.insert("add".to_string(), Value::from(self.endpoint.host()));
        payload.insert("port".to_string(), Value::from(self.endpoint.port()));
        payload.insert("id".to_string(), Value::from(id));
        payload.insert("ps".to_string(), Value::from(self.tag.as_str()));
        payload.insert("v".to_string(), Value::from("2"));
        for (key, value) in self
            .transport
            .generic_view()
            .into_iter()
            .chain(self.tls.generic_view())
        {
            payload.insert(key.to_string(), Value::from(value));
        }

        let body = serde_json::to_string(&payload)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(body);
        Ok(format!("{}://{}", self.protocol.scheme(), encoded))
    }
}
