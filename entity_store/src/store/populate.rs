use super::{merge_records, EntityStore};
use crate::tracked::{FieldSet, Tracked};
use crate::traits::Entity;
use futures::future::join_all;
use std::collections::HashMap;

impl EntityStore {
    /// Make sure `record` carries `fields`, fetching only what is missing
    ///
    /// `fields = None` asks for every attribute of `T`. Names that are not
    /// attributes of `T` are logged and ignored. With `force_refetch` the cached
    /// entry is dropped and every requested field is fetched again.
    ///
    /// Requested relation fields are then reconciled: stub related records are
    /// replaced by complete, identity-mapped copies.
    ///
    /// The returned record is authoritative; the one passed in may be stale.
    pub async fn populate<T: Entity>(
        &self,
        record: Tracked<T>,
        fields: Option<&[&str]>,
        force_refetch: bool,
    ) -> Tracked<T> {
        let requested = requested_fields::<T>(fields);
        let mut working = record;

        let needed: FieldSet = if force_refetch {
            self.invalidate::<T>(working.id());
            requested.clone()
        } else {
            requested.difference(working.received()).cloned().collect()
        };

        if !needed.is_empty() {
            let id = working.id().to_string();
            let needed: Vec<&str> = needed.iter().map(String::as_str).collect();
            crate::debug_log!(type_name = T::TYPE_NAME, id = %id, fields = ?needed, "populating");

            if let Some(refreshed) = self.get::<T>(&id, Some(&needed)).await {
                working = merge_records(&working, refreshed);
                self.cache.insert(Self::key::<T>(&id), working.clone());
            }
        }

        working.value_mut().reconcile_relations(self, &requested).await;
        working
    }

    /// Replace a stub `record` with a complete copy, from the cache when possible
    pub async fn ensure_complete<T: Entity>(&self, record: &mut Tracked<T>) {
        if !record.needs_population(None) {
            return;
        }

        let id = record.id().to_string();
        let mut resolved = self.get::<T>(&id, None).await;
        // a stub can sit in the cache too
        if resolved.as_ref().is_some_and(|found| found.needs_population(None)) {
            resolved = self.fetch_full::<T>(&id).await;
        }

        if let Some(found) = resolved {
            *record = merge_records(record, found);
        }
    }

    /// Batch form of [`ensure_complete`](Self::ensure_complete)
    pub async fn ensure_all_complete<T: Entity>(&self, records: &mut [Tracked<T>]) {
        let stubs: Vec<String> = records
            .iter()
            .filter(|record| record.needs_population(None))
            .map(|record| record.id().to_string())
            .collect();
        if stubs.is_empty() {
            return;
        }

        let mut complete: HashMap<String, Tracked<T>> = HashMap::new();
        let mut still_stubs = Vec::new();
        for found in self.get_many::<T, _, _>(&stubs).await {
            if found.needs_population(None) {
                still_stubs.push(found.id().to_string());
            } else {
                complete.insert(found.id().to_string(), found);
            }
        }

        let refetched = join_all(still_stubs.iter().map(|id| self.fetch_full::<T>(id))).await;
        for found in refetched.into_iter().flatten() {
            complete.insert(found.id().to_string(), found);
        }

        for record in records.iter_mut() {
            if let Some(found) = complete.get(record.id()) {
                *record = merge_records(record, found.clone());
            }
        }
    }
}

fn requested_fields<T: Entity>(fields: Option<&[&str]>) -> FieldSet {
    match fields {
        None => T::field_names().iter().map(|name| name.to_string()).collect(),
        Some(names) => names
            .iter()
            .filter(|name| {
                let known = T::has_attribute(name);
                if !known {
                    tracing::warn!(
                        type_name = T::TYPE_NAME,
                        field = %name,
                        "ignoring unknown field in populate"
                    );
                }
                known
            })
            .map(|name| name.to_string())
            .collect(),
    }
}
