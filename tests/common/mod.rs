//! A fake Stash server for the integration tests
//!
//! Replies honour the requested selection: only top-level attributes named in
//! the query document come back, like a real GraphQL server.

#![allow(dead_code)]

use serde_json::{Value, json};
use stashhaus::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Call {
    pub query: String,
    pub variables: Value,
}

type Handler = dyn Fn(&str, &Value) -> Result<Value, ExecutorError> + Send + Sync;

pub struct FakeStash {
    calls: Mutex<Vec<Call>>,
    handler: Box<Handler>,
}

impl FakeStash {
    /// A server holding `scene_total` scenes and two performers
    pub fn with_scenes(scene_total: usize) -> Arc<Self> {
        Self::with_handler(move |query, variables| route(query, variables, scene_total))
    }

    pub fn with_handler<F>(handler: F) -> Arc<Self>
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
impl Executor for FakeStash {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ExecutorError> {
        self.calls.lock().unwrap().push(Call {
            query: query.to_string(),
            variables: variables.clone(),
        });
        (self.handler)(query, &variables)
    }
}

/// A StashHaus over `executor` with the given cache settings
pub fn stash_with(executor: Arc<FakeStash>, cache: CacheConfig) -> StashHaus {
    let config = AppConfig {
        cache,
        ..AppConfig::default()
    };
    StashHaus::with_executor(executor, config)
}

pub fn stash(executor: Arc<FakeStash>) -> StashHaus {
    stash_with(executor, CacheConfig::default())
}

const CREATED: &str = "2024-01-01T10:00:00Z";
const UPDATED: &str = "2024-03-01T10:00:00Z";

pub fn scene_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Scene {}", id),
        "code": null,
        "details": "",
        "urls": [],
        "date": "2023-12-24",
        "rating100": 80,
        "organized": true,
        "interactive": false,
        "play_count": 3,
        "created_at": CREATED,
        "updated_at": UPDATED,
        "studio": { "id": "1", "name": "Studio 1" },
        "performers": [{ "id": "p1", "name": "Performer p1", "gender": "FEMALE" }],
        "tags": [{ "id": "t1", "name": "Outdoor" }],
        "galleries": [],
    })
}

pub fn performer_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Performer {}", id),
        "alias_list": ["Jane"],
        "gender": "FEMALE",
        "country": "NZ",
        "favorite": true,
        "urls": [],
        "created_at": CREATED,
        "updated_at": UPDATED,
        "tags": [],
        "scenes": [{ "id": "1", "title": "Scene 1" }, { "id": "2", "title": "Scene 2" }],
    })
}

pub fn studio_json(id: &str) -> Value {
    let parent = if id == "1" {
        Value::Null
    } else {
        json!({ "id": "1", "name": "Studio 1" })
    };
    json!({
        "id": id,
        "name": format!("Studio {}", id),
        "url": "https://studio.example",
        "aliases": [],
        "favorite": false,
        "created_at": CREATED,
        "updated_at": UPDATED,
        "parent_studio": parent,
        "child_studios": [],
        "tags": [],
    })
}

/// Names appearing in a query document
fn tokens(query: &str) -> HashSet<&str> {
    query
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Keep only the top-level attributes the query asked for
fn select(full: Value, query: &str) -> Value {
    let wanted = tokens(query);
    match full {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| wanted.contains(key.as_str()))
                .collect(),
        ),
        other => other,
    }
}

fn page_of(variables: &Value, total: usize, query: &str, build: fn(&str) -> Value) -> (usize, Vec<Value>) {
    let page = variables["filter"]["page"].as_u64().unwrap_or(1) as usize;
    let per_page = variables["filter"]["per_page"].as_u64().unwrap_or(25) as usize;
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    let items = (start..end)
        .map(|i| select(build(&(i + 1).to_string()), query))
        .collect();
    (total, items)
}

fn route(query: &str, variables: &Value, scene_total: usize) -> Result<Value, ExecutorError> {
    let id = variables.get("id").and_then(Value::as_str).unwrap_or_default();

    if query.contains("findScenes(") {
        let (count, scenes) = page_of(variables, scene_total, query, scene_json);
        return Ok(json!({ "findScenes": { "count": count, "scenes": scenes } }));
    }
    if query.contains("findScene(") {
        let known = id
            .parse::<usize>()
            .is_ok_and(|n| (1..=scene_total).contains(&n));
        let reply = if known {
            select(scene_json(id), query)
        } else {
            Value::Null
        };
        return Ok(json!({ "findScene": reply }));
    }
    if query.contains("findPerformers(") {
        let (count, performers) = page_of(variables, 2, query, performer_json);
        return Ok(json!({ "findPerformers": { "count": count, "performers": performers } }));
    }
    if query.contains("findPerformer(") {
        return Ok(json!({ "findPerformer": select(performer_json(id), query) }));
    }
    if query.contains("findStudio(") {
        return Ok(json!({ "findStudio": select(studio_json(id), query) }));
    }
    if query.contains("findGalleries(") {
        return Ok(json!({ "findGalleries": { "count": 0, "galleries": [] } }));
    }
    if query.contains("version") {
        return Ok(json!({ "version": { "version": "v0.27.2" } }));
    }

    Err(ExecutorError::Server(vec![format!("unsupported query: {}", query)]))
}
