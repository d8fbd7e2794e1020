use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Process configuration. Defaults are overridden by environment variables
/// (`DATABASE_URL`, `LISTEN_ADDR`, `LOGLEVEL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://medicines.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&[
            "DATABASE_URL",
            "LISTEN_ADDR",
            "LOGLEVEL",
        ]))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "sqlite://other.db");
            let cfg = Config::load()?;
            assert_eq!(cfg.database_url, "sqlite://other.db");
            assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
            assert_eq!(cfg.loglevel, "info");
            Ok(())
        });
    }
}
