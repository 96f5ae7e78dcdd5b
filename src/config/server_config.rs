use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed proxy server configuration. Only the fields the link generator
/// needs are modeled; everything else in the file is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub inbounds: Vec<Inbound>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inbound {
    pub tag: String,
    pub protocol: String,
    #[serde(rename = "streamSettings")]
    pub stream_settings: StreamSettings,
    /// Raw protocol-specific settings block; the client list lives at
    /// `settings.clients` and is kept untyped so client records pass through
    /// unmodified.
    #[serde(default)]
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    pub network: String,
    #[serde(rename = "wsSettings", skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WsSettings>,
    #[serde(rename = "grpcSettings", skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<GrpcSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrpcSettings {
    #[serde(rename = "serviceName", skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}
