//! Models and a recording executor shared by the unit tests

use crate::errors::ExecutorError;
use crate::tracked::Tracked;
use crate::traits::Executor;
use crate::{async_trait, record};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[record]
#[entity(type_name = "Studio")]
pub struct Studio {
    pub id: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[entity(relation)]
    pub parent_studio: Option<Box<Tracked<Studio>>>,
}

#[record]
#[entity(type_name = "Performer")]
pub struct Performer {
    pub id: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub aliases: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[record]
#[entity(type_name = "Scene")]
pub struct Scene {
    pub id: String,
    pub title: Option<String>,
    pub rating100: Option<i64>,
    pub organized: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[entity(relation)]
    pub studio: Option<Tracked<Studio>>,

    #[entity(relation)]
    pub performers: Vec<Tracked<Performer>>,
}

#[record]
#[entity(type_name = "Gallery", plural = "galleries")]
pub struct Gallery {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub query: String,
    pub variables: Value,
}

type Handler = dyn Fn(&str, &Value) -> Result<Value, ExecutorError> + Send + Sync;

/// Executor answering from a closure and recording every request
pub struct MockExecutor {
    calls: Mutex<Vec<Call>>,
    handler: Box<Handler>,
}

impl MockExecutor {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&str, &Value) -> Result<Value, ExecutorError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ExecutorError> {
        self.calls.lock().unwrap().push(Call {
            query: query.to_string(),
            variables: variables.clone(),
        });
        (self.handler)(query, &variables)
    }
}

/// A complete scene reply object
pub fn scene_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Scene {}", id),
        "rating100": 80,
        "organized": true,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z",
        "studio": { "id": "s1", "name": "North" },
        "performers": [],
    })
}

/// `count` matching scenes served page by page from `findScenes`
pub fn paged_scenes(count: usize) -> impl Fn(&str, &Value) -> Result<Value, ExecutorError> {
    move |_query, variables| {
        let page = variables["filter"]["page"].as_u64().unwrap_or(1) as usize;
        let per_page = variables["filter"]["per_page"].as_u64().unwrap_or(25) as usize;
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(count);
        let scenes: Vec<Value> = (start..end)
            .map(|i| scene_json(&(i + 1).to_string()))
            .collect();
        Ok(json!({ "findScenes": { "count": count, "scenes": scenes } }))
    }
}
