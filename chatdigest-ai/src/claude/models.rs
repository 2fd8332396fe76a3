#[derive(serde::Serialize)]
pub struct ClaudeRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<ClaudeMessage<'a>>,
}

#[derive(serde::Serialize)]
pub struct ClaudeMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(serde::Deserialize)]
pub struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(serde::Deserialize)]
pub struct Content {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ApiError {
    pub message: String,
}
