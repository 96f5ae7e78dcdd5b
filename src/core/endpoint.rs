use crate::utils::error::{Result, SubsError};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    /// Bare host[:port] target; reachable over plain http.
    Implicit,
    Http,
    Https,
}

/// A resolved public endpoint from the domain map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
    scheme: Scheme,
}

impl Endpoint {
    const DEFAULT_PORT: u16 = 80;

    pub fn parse(target: &str) -> Result<Self> {
        if target.starts_with("http://") || target.starts_with("https://") {
            let url = Url::parse(target).map_err(|_| SubsError::MalformedEndpoint {
                target: target.to_string(),
            })?;
            let host = url
                .host_str()
                .ok_or_else(|| SubsError::MalformedEndpoint {
                    target: target.to_string(),
                })?
                .to_string();
            let port = url.port_or_known_default().unwrap_or(Self::DEFAULT_PORT);
            let scheme = if url.scheme() == "https" {
                Scheme::Https
            } else {
                Scheme::Http
            };
            return Ok(Self { host, port, scheme });
        }

        // 裸目標：以最後一個冒號切出埠號
        let (host, port) = match target.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| SubsError::MalformedEndpoint {
                    target: target.to_string(),
                })?;
                (host, port)
            }
            None => (target, Self::DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(SubsError::MalformedEndpoint {
                target: target.to_string(),
            });
        }

        Ok(Self {
            host: host.to_string(),
            port,
            scheme: Scheme::Implicit,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// SNI fallback host. Only URL-form https targets ever default an SNI;
    /// bare targets never do, regardless of port.
    pub fn default_sni(&self) -> Option<&str> {
        match self.scheme {
            Scheme::Https => Some(&self.host),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_and_port() {
        let ep = Endpoint::parse("10.0.0.1:8443").unwrap();
        assert_eq!(ep.host(), "10.0.0.1");
        assert_eq!(ep.port(), 8443);
        assert_eq!(ep.default_sni(), None);
    }

    #[test]
    fn bare_host_defaults_to_port_80() {
        let ep = Endpoint::parse("10.0.0.1").unwrap();
        assert_eq!(ep.host(), "10.0.0.1");
        assert_eq!(ep.port(), 80);
    }

    #[test]
    fn bare_target_splits_on_last_colon() {
        let ep = Endpoint::parse("node.internal:example:9000").unwrap();
        assert_eq!(ep.host(), "node.internal:example");
        assert_eq!(ep.port(), 9000);
    }

    #[test]
    fn http_url_defaults_to_port_80() {
        let ep = Endpoint::parse("http://proxy.example.com").unwrap();
        assert_eq!(ep.host(), "proxy.example.com");
        assert_eq!(ep.port(), 80);
        assert_eq!(ep.default_sni(), None);
    }

    #[test]
    fn https_url_defaults_to_port_443_and_sni() {
        let ep = Endpoint::parse("https://proxy.example.com").unwrap();
        assert_eq!(ep.host(), "proxy.example.com");
        assert_eq!(ep.port(), 443);
        assert_eq!(ep.default_sni(), Some("proxy.example.com"));
    }

    #[test]
    fn https_url_with_explicit_port() {
        let ep = Endpoint::parse("https://proxy.example.com:8443").unwrap();
        assert_eq!(ep.port(), 8443);
        assert_eq!(ep.default_sni(), Some("proxy.example.com"));
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(Endpoint::parse(":443").is_err());
        assert!(Endpoint::parse("").is_err());
    }

    #[test]
    fn unparsable_port_is_rejected() {
        assert!(Endpoint::parse("10.0.0.1:notaport").is_err());
    }
}
