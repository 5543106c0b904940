use chrono::{DateTime, Utc};
use entity_store::{record, Tracked};

use super::Tag;

#[record]
#[entity(type_name = "Studio")]
pub struct Studio {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub aliases: Vec<String>,
    pub details: Option<String>,
    pub rating100: Option<i64>,
    pub favorite: bool,
    pub ignore_auto_tag: bool,
    pub image_path: Option<String>,
    pub scene_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[entity(relation)]
    pub parent_studio: Option<Box<Tracked<Studio>>>,

    #[entity(relation)]
    pub child_studios: Vec<Tracked<Studio>>,

    #[entity(relation)]
    pub tags: Vec<Tracked<Tag>>,
}
