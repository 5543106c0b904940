//! Relation reconciliation
//!
//! Generated `Entity::reconcile_relations` bodies call [`Related::reconcile`] on
//! each relation field the caller asked for; the field's type picks the impl.

use crate::store::EntityStore;
use crate::tracked::Tracked;
use crate::traits::Entity;
use async_trait::async_trait;

#[async_trait]
pub trait Related: Send {
    async fn reconcile(&mut self, store: &EntityStore);
}

#[async_trait]
impl<T: Entity> Related for Option<Tracked<T>> {
    async fn reconcile(&mut self, store: &EntityStore) {
        if let Some(record) = self {
            store.ensure_complete(record).await;
        }
    }
}

#[async_trait]
impl<T: Entity> Related for Option<Box<Tracked<T>>> {
    async fn reconcile(&mut self, store: &EntityStore) {
        if let Some(record) = self {
            store.ensure_complete(record.as_mut()).await;
        }
    }
}

#[async_trait]
impl<T: Entity> Related for Vec<Tracked<T>> {
    async fn reconcile(&mut self, store: &EntityStore) {
        store.ensure_all_complete(self).await;
    }
}
