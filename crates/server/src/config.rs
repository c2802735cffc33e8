use render::RenderOptions;

pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub content_type: &'static str,
    pub render: RenderOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            content_type: "image/png",
            render: RenderOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Read `PORT` from the environment. Unset or empty means the default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("PORT") {
            let raw = raw.trim();
            if !raw.is_empty() {
                cfg.port = raw
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid PORT {raw:?}: {e}"))?;
            }
        }
        Ok(cfg)
    }
}
