use chrono::{DateTime, Utc};
use entity_store::{record, Tracked};

use super::{Gallery, Performer, Studio, Tag};

#[record]
#[entity(type_name = "Scene")]
pub struct Scene {
    pub id: String,
    pub title: Option<String>,
    pub code: Option<String>,
    pub details: Option<String>,
    pub director: Option<String>,
    pub urls: Vec<String>,
    /// `YYYY-MM-DD`, possibly partial
    pub date: Option<String>,
    pub rating100: Option<i64>,
    pub organized: bool,
    pub o_counter: Option<i64>,
    pub interactive: bool,
    pub play_count: Option<i64>,
    pub play_duration: Option<f64>,
    pub resume_time: Option<f64>,
    pub last_played_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[entity(relation)]
    pub studio: Option<Tracked<Studio>>,

    #[entity(relation)]
    pub performers: Vec<Tracked<Performer>>,

    #[entity(relation)]
    pub tags: Vec<Tracked<Tag>>,

    #[entity(relation)]
    pub galleries: Vec<Tracked<Gallery>>,
}
