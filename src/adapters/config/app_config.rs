use config::Config;
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "LEAD_CAPTURE";
pub const ENV_SEPARATOR: &str = "__";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: super::sheets_config::SheetsConfig,
    #[serde(default)]
    pub logging: super::logging_config::LoggingConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Error reading configuration '{path}'")]
    Read { path: String },
    #[error("Failed to deserialize configuration at field '{field}'")]
    Deserialize { field: String },
    #[error("Invalid configuration: {details}")]
    Invalid { details: String },
}

impl AppConfig {
    /// Reads the optional file named by `CONFIG_PATH` (default `Config`), then lets
    /// `LEAD_CAPTURE__*` environment variables override it.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .change_context_lazy(|| AppConfigError::Read {
                path: config_path.clone(),
            })?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> error_stack::Result<Self, AppConfigError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(AppConfigError::Deserialize {
                field: String::from("<root>"),
            })?;

        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> error_stack::Result<Self, AppConfigError> {
        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);

        let config = AppConfig::deserialize(path_de).map_err(move |e| {
            report!(AppConfigError::Deserialize {
                field: field_path(track),
            })
            .attach_printable(e.to_string())
            .attach_printable("Make sure all required fields are present in the configuration")
        })?;

        config
            .sheets
            .spreadsheets
            .validate()
            .map_err(|details| report!(AppConfigError::Invalid { details }))?;

        Ok(config)
    }
}

fn field_path(track: Track) -> String {
    let path_str = track
        .path()
        .iter()
        .map(|seg| match seg {
            Segment::Seq { index } => format!("[{}]", index),
            Segment::Map { key } => format!(".{}", key),
            Segment::Enum { variant } => format!("::{}", variant),
            Segment::Unknown => String::from("<?>"),
        })
        .collect::<String>();

    path_str.trim_start_matches('.').to_string()
}
