use crate::config::server_config::StreamSettings;
use crate::utils::error::{Result, SubsError};

/// A view is an ordered key/value list; order is part of the external link
/// format and must survive into query strings and JSON payloads.
pub type View = Vec<(&'static str, String)>;

type RenameTable = &'static [(&'static str, &'static str)];

const WS_RENAMES: RenameTable = &[("net", "type")];
const GRPC_RENAMES: RenameTable = &[("net", "type"), ("path", "serviceName")];
const TLS_RENAMES: RenameTable = &[("tls", "security")];

/// In-place key substitution, one table per variant.
fn rename_keys(view: View, table: RenameTable) -> View {
    view.into_iter()
        .map(|(key, value)| {
            let renamed = table
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| *to)
                .unwrap_or(key);
            (renamed, value)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSettings {
    Ws {
        host: Option<String>,
        path: Option<String>,
    },
    Grpc {
        path: Option<String>,
    },
}

impl TransportSettings {
    pub fn from_stream(stream: &StreamSettings) -> Result<Self> {
        match stream.network.as_str() {
            "ws" => {
                let ws = stream.ws_settings.as_ref();
                Ok(TransportSettings::Ws {
                    host: ws.and_then(|s| s.headers.get("Host").cloned()),
                    path: ws.and_then(|s| s.path.clone()),
                })
            }
            "grpc" => Ok(TransportSettings::Grpc {
                path: stream
                    .grpc_settings
                    .as_ref()
                    .and_then(|s| s.service_name.clone()),
            }),
            other => Err(SubsError::UnsupportedTransport {
                network: other.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TransportSettings::Ws { .. } => "ws",
            TransportSettings::Grpc { .. } => "grpc",
        }
    }

    /// Key order: net, host, path. Absent fields are omitted entirely.
    pub fn generic_view(&self) -> View {
        let mut view = vec![("net", self.kind().to_string())];
        match self {
            TransportSettings::Ws { host, path } => {
                if let Some(host) = host {
                    view.push(("host", host.clone()));
                }
                if let Some(path) = path {
                    view.push(("path", path.clone()));
                }
            }
            TransportSettings::Grpc { path } => {
                if let Some(path) = path {
                    view.push(("path", path.clone()));
                }
            }
        }
        view
    }

    pub fn native_view(&self) -> View {
        let table = match self {
            TransportSettings::Ws { .. } => WS_RENAMES,
            TransportSettings::Grpc { .. } => GRPC_RENAMES,
        };
        rename_keys(self.generic_view(), table)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSettings {
    sni: Option<String>,
}

impl TlsSettings {
    /// Empty SNI strings normalize to absent: no SNI means no tls flag.
    pub fn new(sni: Option<String>) -> Self {
        Self {
            sni: sni.filter(|s| !s.is_empty()),
        }
    }

    /// Key order: sni, tls. Both present or both absent.
    pub fn generic_view(&self) -> View {
        match &self.sni {
            Some(sni) => vec![("sni", sni.clone()), ("tls", "tls".to_string())],
            None => Vec::new(),
        }
    }

    pub fn native_view(&self) -> View {
        rename_keys(self.generic_view(), TLS_RENAMES)
    }
}
