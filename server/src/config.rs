use std::{
    collections::HashMap,
    env, fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);
const DEFAULT_HTTP_PATH: &str = "/mcp";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Stdio,
    Http,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" | "streamable-http" => Ok(Transport::Http),
            other => anyhow::bail!("unknown transport: {other}"),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stdio => f.write_str("stdio"),
            Transport::Http => f.write_str("http"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub transport: Transport,
    pub bind: SocketAddr,
    pub http_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            bind: DEFAULT_BIND,
            http_path: DEFAULT_HTTP_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    pub const ENV_TRANSPORT: &str = "UNITY_MCP_TRANSPORT";
    pub const ENV_BIND: &str = "UNITY_MCP_BIND";
    pub const ENV_HTTP_PATH: &str = "UNITY_MCP_HTTP_PATH";

    /// Construct from real process environment variables.
    pub fn load() -> Self {
        Self::from_reader(|k| env::var(k).ok())
    }

    /// Construct from an arbitrary key/value source (for tests).
    pub fn from_map<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_reader(|k| map.get(k).cloned())
    }

    fn from_reader<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = get(Self::ENV_TRANSPORT) {
            match raw.parse::<Transport>() {
                Ok(transport) => cfg.transport = transport,
                Err(e) => tracing::warn!("{}: {}, using {}", Self::ENV_TRANSPORT, e, cfg.transport),
            }
        }

        if let Some(raw) = get(Self::ENV_BIND) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => cfg.bind = addr,
                Err(e) => tracing::warn!("{}: {}, using {}", Self::ENV_BIND, e, cfg.bind),
            }
        }

        if let Some(raw) = get(Self::ENV_HTTP_PATH) {
            cfg.http_path = normalize_path(&raw);
        }

        cfg
    }
}

fn normalize_path(s: &str) -> String {
    let t = s.trim().trim_end_matches('/');
    if t.is_empty() {
        "/".to_string()
    } else if t.starts_with('/') {
        t.to_string()
    } else {
        format!("/{}", t)
    }
}
