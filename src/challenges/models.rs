use crate::map::models::Coordinate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChallengeMode {
    StreetLevel,
    CuratedImage,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub mode: ChallengeMode,
    pub target: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
}

impl Challenge {
    pub fn street_level(target: Coordinate) -> Self {
        Self {
            mode: ChallengeMode::StreetLevel,
            target,
            image_ref: None,
            name: None,
            fun_fact: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedLocation {
    #[serde(flatten)]
    pub location: Coordinate,
    pub image_ref: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fun_fact: Option<String>,
}

impl From<&CuratedLocation> for Challenge {
    fn from(location: &CuratedLocation) -> Self {
        Self {
            mode: ChallengeMode::CuratedImage,
            target: location.location,
            image_ref: Some(location.image_ref.clone()),
            name: location.name.clone(),
            fun_fact: location.fun_fact.clone(),
        }
    }
}
