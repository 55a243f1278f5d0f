use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Instagram,
    Tiktok,
    Twitter,
    Youtube,
    Facebook,
    Linkedin,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Instagram,
        Platform::Tiktok,
        Platform::Twitter,
        Platform::Youtube,
        Platform::Facebook,
        Platform::Linkedin,
        Platform::Pinterest,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
            Platform::Pinterest => "pinterest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Tiktok => "TikTok",
            Platform::Twitter => "Twitter / X",
            Platform::Youtube => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Linkedin => "LinkedIn",
            Platform::Pinterest => "Pinterest",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Balanced,
    Trending,
    Niche,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Balanced, Strategy::Trending, Strategy::Niche];

    pub fn id(self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Trending => "trending",
            Strategy::Niche => "niche",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Balanced => "Balanced",
            Strategy::Trending => "Trending",
            Strategy::Niche => "Niche",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Strategy::Balanced => "Mix of trending, niche & evergreen",
            Strategy::Trending => "Focus on high discovery & virality",
            Strategy::Niche => "Targeted, specific & low-competition",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn default_language() -> String {
    "English".to_string()
}

fn default_location() -> String {
    "Global".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_location")]
    pub location: String,
}

impl GenerationRequest {
    /// Checks the description before anything leaves the process.
    pub fn validate(&self) -> Result<(), String> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            return Err("Please describe your post first.".to_string());
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(format!(
                "Description must be at most {} characters.",
                MAX_DESCRIPTION_CHARS
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagSuggestion {
    pub tag: String,
    pub explanation: String,
    #[serde(rename = "viralScore")]
    pub viral_score: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub hashtags: Vec<HashtagSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn success(hashtags: Vec<HashtagSuggestion>) -> Self {
        Self {
            hashtags,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            hashtags: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(tag: &str, score: u8) -> HashtagSuggestion {
        HashtagSuggestion {
            tag: tag.to_string(),
            explanation: "because".to_string(),
            viral_score: score,
        }
    }

    #[test]
    fn request_defaults_fill_missing_options() {
        let req: GenerationRequest = serde_json::from_str(r#"{"description":"coffee"}"#).unwrap();
        assert_eq!(req.platform, Platform::Instagram);
        assert_eq!(req.strategy, Strategy::Balanced);
        assert_eq!(req.language, "English");
        assert_eq!(req.location, "Global");
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let res = serde_json::from_str::<GenerationRequest>(
            r#"{"description":"coffee","platform":"myspace"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn whitespace_description_is_invalid() {
        let req: GenerationRequest = serde_json::from_str(r#"{"description":"  \n\t "}"#).unwrap();
        assert!(req.validate().is_err());

        let missing: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn description_length_counts_characters() {
        let mut req: GenerationRequest = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        req.description = "é".repeat(MAX_DESCRIPTION_CHARS);
        assert!(req.validate().is_ok());
        req.description.push('é');
        assert!(req.validate().is_err());
    }

    #[test]
    fn suggestion_serializes_camel_case_score() {
        let json = serde_json::to_value(suggestion("#a", 42)).unwrap();
        assert_eq!(json["viralScore"], 42);
    }

    #[test]
    fn error_response_has_empty_hashtags() {
        let json = serde_json::to_value(GenerationResponse::error("nope")).unwrap();
        assert_eq!(json["hashtags"], serde_json::json!([]));
        assert_eq!(json["error"], "nope");

        let ok = serde_json::to_value(GenerationResponse::success(vec![])).unwrap();
        assert!(ok.get("error").is_none());
    }
}
