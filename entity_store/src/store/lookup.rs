use super::EntityStore;
use crate::query::selection;
use crate::tracked::Tracked;
use crate::traits::Entity;
use futures::future::join_all;
use serde_json::{json, Value};
use std::collections::HashSet;

impl EntityStore {
    /// Look one record up by id
    ///
    /// With `fields`, the cache is bypassed and exactly those fields (plus the
    /// base fields) are fetched and merged into the cached entry. Without, a live
    /// cached copy is returned as is and a miss fetches every attribute.
    ///
    /// Remote failures are logged and reported as `None`.
    pub async fn get<T: Entity>(&self, id: &str, fields: Option<&[&str]>) -> Option<Tracked<T>> {
        match fields {
            Some(fields) => {
                let selection = selection::selection_for::<T, _>(fields.iter().copied());
                let record = self.fetch_by_id::<T>(id, &selection).await?;
                Some(self.remember(record))
            }
            None => {
                if let Some(hit) = self.cache.get::<Tracked<T>>(&Self::key::<T>(id)) {
                    crate::debug_log!(type_name = T::TYPE_NAME, id, "cache hit");
                    return Some(hit);
                }
                self.fetch_full::<T>(id).await
            }
        }
    }

    /// Look several records up by id
    ///
    /// Cached ids are answered locally; the rest are fetched concurrently, one
    /// request each. Ids the server does not know are left out, and the order of
    /// the result is not guaranteed.
    pub async fn get_many<T, I, S>(&self, ids: I) -> Vec<Tracked<T>>
    where
        T: Entity,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id.to_string()) {
                continue;
            }
            match self.cache.get::<Tracked<T>>(&Self::key::<T>(id)) {
                Some(hit) => found.push(hit),
                None => missing.push(id.to_string()),
            }
        }

        crate::debug_log!(
            type_name = T::TYPE_NAME,
            hits = found.len(),
            misses = missing.len(),
            "batch lookup"
        );

        let fetched = join_all(missing.iter().map(|id| self.fetch_full::<T>(id))).await;
        found.extend(fetched.into_iter().flatten());
        found
    }

    /// Fetch every attribute and cache the result
    pub(crate) async fn fetch_full<T: Entity>(&self, id: &str) -> Option<Tracked<T>> {
        let record = self
            .fetch_by_id::<T>(id, &selection::full_selection::<T>())
            .await?;
        Some(self.remember(record))
    }

    async fn fetch_by_id<T: Entity>(&self, id: &str, selection: &str) -> Option<Tracked<T>> {
        let document = selection::find_by_id_document::<T>(selection);
        let data = match self.executor.execute(&document, json!({ "id": id })).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    type_name = T::TYPE_NAME,
                    id,
                    error = %e,
                    "lookup failed, treating the record as not found"
                );
                return None;
            }
        };

        let raw = match data {
            Value::Object(mut data) => data.remove(&selection::find_one_root::<T>()),
            _ => None,
        };

        match raw {
            None | Some(Value::Null) => {
                crate::debug_log!(type_name = T::TYPE_NAME, id, "record not found");
                None
            }
            Some(raw) => match Tracked::<T>::from_value(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        type_name = T::TYPE_NAME,
                        id,
                        error = %e,
                        "could not build record from lookup reply"
                    );
                    None
                }
            },
        }
    }
}
