#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub token: String,
    pub destination_channel_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Config {
    pub fn new(token: impl Into<String>, destination_channel_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            destination_channel_id: destination_channel_id.into(),
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}
