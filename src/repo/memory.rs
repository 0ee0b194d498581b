use super::ThingRepository;
use crate::error::AppError;
use crate::model::{Thing, ThingAttrs};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Thing>,
}

impl Table {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }
}

/// Process-local store. The name uniqueness check and the write happen under one lock,
/// matching the unique index on the SQL side.
#[derive(Default)]
pub struct MemoryThingRepository {
    table: Mutex<Table>,
}

impl MemoryThingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThingRepository for MemoryThingRepository {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn all(&self) -> Result<Vec<Thing>, AppError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Thing>, AppError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn name_taken(&self, name: &str, except: Option<i64>) -> Result<bool, AppError> {
        Ok(self.table.lock().await.name_taken(name, except))
    }

    async fn insert(&self, attrs: &ThingAttrs) -> Result<Thing, AppError> {
        let mut table = self.table.lock().await;
        if table.name_taken(&attrs.name, None) {
            return Err(AppError::Conflict(attrs.name.clone()));
        }
        table.next_id += 1;
        let now = Utc::now();
        let thing = Thing {
            id: table.next_id,
            name: attrs.name.clone(),
            description: attrs.description.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(thing.id, thing.clone());
        Ok(thing)
    }

    async fn update(&self, id: i64, attrs: &ThingAttrs) -> Result<Option<Thing>, AppError> {
        let mut table = self.table.lock().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.name_taken(&attrs.name, Some(id)) {
            return Err(AppError::Conflict(attrs.name.clone()));
        }
        let Some(thing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        thing.name = attrs.name.clone();
        thing.description = attrs.description.clone();
        thing.updated_at = Utc::now();
        Ok(Some(thing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
