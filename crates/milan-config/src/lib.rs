use anyhow::Context;
use milan::compatibility::{DEFAULT_ASCENDANT_TABLE, DEFAULT_MOON_TABLE};
use milan::{EphemerisConfig, HouseSystem, RuleBook, RuleTableDef};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5000;
pub const HOSTED_HOST: &str = "0.0.0.0";
pub const HOSTED_PORT: u16 = 10000;

/// Hosted when `RENDER` is set, local otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Hosted,
    #[default]
    Local,
}

impl Environment {
    /// Name reported by the health check.
    pub fn label(self) -> &'static str {
        match self {
            Environment::Hosted => "Render",
            Environment::Local => "Localhost",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub public_url: Option<String>,
}

impl ServerSettings {
    /// Address string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL reported by the health check.
    pub fn url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilitySettings {
    pub moon_table: String,
    pub ascendant_table: String,
    pub tables: Vec<RuleTableDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub ephemeris: EphemerisConfig,
    pub compatibility: CompatibilitySettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerToml {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    public_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    topocentric: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CompatibilityToml {
    #[serde(default)]
    moon_table: Option<String>,
    #[serde(default)]
    ascendant_table: Option<String>,
    #[serde(default)]
    tables: Vec<RuleTableDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    server: ServerToml,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    compatibility: CompatibilityToml,
}

/// Relative locations tried for `configs/milan.toml`, as the workspace
/// binaries may run from the repo root or from their crate directory.
const CONFIG_PATHS: [&str; 2] = ["configs/milan.toml", "../../configs/milan.toml"];

/// Read the config file text. An explicit path must exist; without one the
/// default locations are tried and `None` means built-in defaults.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        return Ok(Some(text));
    }
    for p in &CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            log::info!("Loaded config from {}", p);
            return Ok(Some(text));
        }
    }
    log::info!("No config file found in {:?}; using defaults", CONFIG_PATHS);
    Ok(None)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            server: ServerSettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                public_url: None,
            },
            ephemeris: EphemerisConfig::default(),
            compatibility: CompatibilitySettings {
                moon_table: DEFAULT_MOON_TABLE.to_string(),
                ascendant_table: DEFAULT_ASCENDANT_TABLE.to_string(),
                tables: Vec::new(),
            },
        }
    }
}

impl Settings {
    /// File, then process environment.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match read_config_text(explicit)? {
            Some(text) => Self::from_toml_str(&text)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Parse file contents on top of the defaults. Environment is not consulted.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let root: RootConfigToml =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse milan.toml: {e}"))?;
        let RootConfigToml {
            server,
            ephemeris,
            compatibility,
        } = root;

        let mut settings = Self::default();
        if let Some(host) = server.host {
            settings.server.host = host;
        }
        if let Some(port) = server.port {
            settings.server.port = port;
        }
        settings.server.public_url = server.public_url;

        if let Some(path) = ephemeris.path {
            settings.ephemeris.ephemeris_path = path;
        }
        if let Some(system) = ephemeris.house_system {
            settings.ephemeris.house_system = system
                .parse::<HouseSystem>()
                .with_context(|| "Invalid [ephemeris] house_system")?;
        }
        settings.ephemeris.topocentric = ephemeris.topocentric;

        if let Some(moon) = compatibility.moon_table {
            settings.compatibility.moon_table = moon;
        }
        if let Some(asc) = compatibility.ascendant_table {
            settings.compatibility.ascendant_table = asc;
        }
        settings.compatibility.tables = compatibility.tables;
        Ok(settings)
    }

    /// Apply `RENDER`, `HOST`, `PORT`, `SWISS_EPHEMERIS_PATH` and `MILAN_EPHE_PATH`.
    ///
    /// Hosted mode binds every interface and defaults the port to 10000.
    /// `MILAN_EPHE_PATH` wins over `SWISS_EPHEMERIS_PATH`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match set("PORT") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            ),
            None => None,
        };

        if set("RENDER").is_some() {
            self.environment = Environment::Hosted;
            self.server.host = HOSTED_HOST.to_string();
            self.server.port = port.unwrap_or(HOSTED_PORT);
        } else {
            self.environment = Environment::Local;
            if let Some(host) = set("HOST") {
                self.server.host = host;
            }
            if let Some(port) = port {
                self.server.port = port;
            }
        }
        if let Some(url) = set("PUBLIC_URL") {
            self.server.public_url = Some(url);
        }

        if let Some(path) = set("MILAN_EPHE_PATH").or_else(|| set("SWISS_EPHEMERIS_PATH")) {
            self.ephemeris.ephemeris_path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Command-line overrides, applied last.
    pub fn apply_cli(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Built-in tables plus configured ones, with the configured selection.
    pub fn rule_book(&self) -> anyhow::Result<RuleBook> {
        let book = RuleBook::with_tables(&self.compatibility.tables)
            .context("Invalid [[compatibility.tables]] entry")?;
        let book = book
            .select(&self.compatibility.moon_table, &self.compatibility.ascendant_table)
            .context("Invalid [compatibility] table selection")?;
        Ok(book)
    }
}
