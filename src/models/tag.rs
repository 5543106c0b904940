use chrono::{DateTime, Utc};
use entity_store::{record, Tracked};

#[record]
#[entity(type_name = "Tag")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub favorite: bool,
    pub ignore_auto_tag: bool,
    pub image_path: Option<String>,
    pub scene_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[entity(relation)]
    pub parents: Vec<Tracked<Tag>>,

    #[entity(relation)]
    pub children: Vec<Tracked<Tag>>,
}
