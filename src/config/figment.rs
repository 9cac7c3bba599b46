use std::path::Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use crate::config::app_config::AuthConfig;
use crate::lib_constants::APP_CONFIG_ENV_PREFIX;

pub trait FigmentExt {
    fn setup_auth_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_auth_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.merge(Serialized::defaults(AuthConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
    }
}
