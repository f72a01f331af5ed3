use serde::Deserialize;

/// User identity taken from verified init data.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TelegramIdentity {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub language_code: String,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl TelegramIdentity {
    /// First name followed by the last name, if any.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().filter(|l| !l.is_empty()) {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }
}
