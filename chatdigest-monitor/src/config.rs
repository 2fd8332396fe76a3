/// Read side of the source platform: credentials, scope and paging limits.
#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub token: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub channel_ids: Vec<String>,
    #[serde(default)]
    pub thread_ids: Vec<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Page requests allowed per channel or thread.
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_rate_limit_retries")]
    pub max_rate_limit_retries: u32,
}

impl Config {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            guild_id: None,
            channel_ids: Vec::new(),
            thread_ids: Vec::new(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            max_requests: default_max_requests(),
            page_size: default_page_size(),
            max_rate_limit_retries: default_max_rate_limit_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://discord.com/api/v9".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_max_requests() -> usize {
    500
}

fn default_page_size() -> u32 {
    100
}

fn default_max_rate_limit_retries() -> u32 {
    3
}
