use chrono::{DateTime, Utc};
use entity_store::{record, Tracked};
use serde::{Deserialize, Serialize};

use super::{Scene, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    TransgenderMale,
    TransgenderFemale,
    Intersex,
    NonBinary,
}

#[record]
#[entity(type_name = "Performer")]
pub struct Performer {
    pub id: String,
    pub name: String,
    pub disambiguation: Option<String>,
    pub alias_list: Vec<String>,
    pub gender: Option<Gender>,
    pub birthdate: Option<String>,
    pub death_date: Option<String>,
    pub country: Option<String>,
    pub ethnicity: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub height_cm: Option<i64>,
    pub weight: Option<i64>,
    pub measurements: Option<String>,
    pub career_length: Option<String>,
    pub tattoos: Option<String>,
    pub piercings: Option<String>,
    pub urls: Vec<String>,
    pub details: Option<String>,
    pub favorite: bool,
    pub ignore_auto_tag: bool,
    pub rating100: Option<i64>,
    pub image_path: Option<String>,
    pub scene_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[entity(relation)]
    pub tags: Vec<Tracked<Tag>>,

    #[entity(relation)]
    pub scenes: Vec<Tracked<Scene>>,
}
