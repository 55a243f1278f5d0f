use serde::Serialize;

use crate::models::{Platform, Strategy};

pub const LANGUAGES: [&str; 10] = [
    "English",
    "Spanish",
    "Portuguese",
    "German",
    "French",
    "Italian",
    "Russian",
    "Arabic",
    "Hindi",
    "Japanese",
];

pub const LOCATIONS: [&str; 18] = [
    "Global",
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
    "France",
    "Spain",
    "Italy",
    "Brazil",
    "Mexico",
    "India",
    "Japan",
    "South Korea",
    "Indonesia",
    "Turkey",
    "United Arab Emirates",
    "Saudi Arabia",
];

#[derive(Debug, Serialize)]
pub struct PlatformOption {
    pub id: Platform,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StrategyOption {
    pub id: Strategy,
    pub label: &'static str,
    pub hint: &'static str,
}

/// Choices a client can offer for a generation request
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub platforms: Vec<PlatformOption>,
    pub strategies: Vec<StrategyOption>,
    pub languages: Vec<&'static str>,
    pub locations: Vec<&'static str>,
    #[serde(rename = "maxDescriptionLength")]
    pub max_description_length: usize,
}

impl OptionsResponse {
    pub fn current() -> Self {
        Self {
            platforms: Platform::ALL
                .into_iter()
                .map(|id| PlatformOption {
                    id,
                    label: id.label(),
                })
                .collect(),
            strategies: Strategy::ALL
                .into_iter()
                .map(|id| StrategyOption {
                    id,
                    label: id.label(),
                    hint: id.hint(),
                })
                .collect(),
            languages: LANGUAGES.to_vec(),
            locations: LOCATIONS.to_vec(),
            max_description_length: crate::models::MAX_DESCRIPTION_CHARS,
        }
    }
}
