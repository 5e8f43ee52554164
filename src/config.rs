use serde_derive::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub db_path: PathBuf,
    #[serde(default = "default_site_title")]
    pub site_title: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_owned()
}

fn default_site_title() -> String {
    "Family trees".to_owned()
}

impl Config {
    /// Reads `<path>.{json,toml}` and then applies `GENEALOGY_*` environment
    /// overrides, e.g. `GENEALOGY_PORT=8080`.
    pub fn load(path: &str) -> Result<Config, config::ConfigError> {
        let mut settings = config::Config::default();
        settings
            .merge(config::File::with_name(path))?
            .merge(config::Environment::with_prefix("GENEALOGY"))?;
        settings.try_into::<Config>()
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
