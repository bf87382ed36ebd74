use serde::Deserialize;

/// Raw on-disk layout. Flat to stay compatible with existing
/// `config.json` files; unknown keys are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(alias = "trakt_client_id")]
    pub client_id: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub trakt_username: Option<String>,

    pub poll_interval: Option<String>,
    pub request_timeout: Option<String>,
    pub viewer_timeout: Option<String>,

    pub rotation: Option<i32>,
    pub output_path: Option<String>,
    pub viewer_command: Option<Vec<String>>,

    pub poster_size: Option<String>,
    pub trakt_base_url: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_image_base_url: Option<String>,
}
