use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub mqtt: MqttSettings,
    pub storage: StorageSettings,
    pub staging: StagingSettings,
    pub simulator: SimulatorSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    /// Topic filter the subscriber consumes readings from.
    pub topic: String,
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// `s3` or `fs`.
    pub backend: String,
    pub bucket: String,
    pub region: String,
    /// Root directory for the `fs` backend.
    pub fs_root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StagingSettings {
    /// Local file where a pending archive record is staged before upload.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorSettings {
    pub enabled: bool,
    pub interval_secs: u64,
    /// Topic the synthetic readings are published to.
    pub topic: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub listen: String,
}

fn default_keep_alive_secs() -> u64 {
    30
}

pub fn load_pipeline_config() -> anyhow::Result<PipelineConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/pipeline"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
