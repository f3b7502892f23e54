//! Client-side query cache contract.
//!
//! Fetched payloads are keyed by `[entity, scope, ...params]` and stay fresh
//! for a window that depends on the entity and scope. A successful mutation
//! drops every key of each entity namespace it touches, so the next read goes
//! back to the server. The cache is advisory: the server is always the source
//! of truth.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Tools,
    Categories,
    Search,
    Analytics,
    Newsletter,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    List,
    Detail,
    Featured,
    Trending,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub entity: Entity,
    pub scope: Scope,
    pub params: Vec<String>,
}

impl QueryKey {
    pub fn new(entity: Entity, scope: Scope) -> Self {
        Self {
            entity,
            scope,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, value: impl ToString) -> Self {
        self.params.push(value.to_string());
        self
    }

    /// How long an entry under this key is served without refetching.
    pub fn stale_time(&self) -> Duration {
        let minutes = match (self.entity, self.scope) {
            (Entity::Tools, Scope::Detail) => 10,
            (Entity::Tools, Scope::Featured) => 10,
            (Entity::Tools, Scope::Trending) => 2,
            (Entity::Tools, Scope::List) => 5,
            (Entity::Categories, _) => 10,
            (Entity::Search, _) => 2,
            (Entity::Analytics, _) => 2,
            (Entity::Newsletter, _) => 5,
            (Entity::Users, _) => 5,
        };
        Duration::minutes(minutes)
    }
}

/// Writes the client can perform, mapped to the namespaces they make stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    SubmitTool,
    UpdateTool,
    DeleteTool,
    ApproveTool,
    ToggleBookmark,
    SubmitReview,
    SaveCategory,
    DeleteCategory,
    Subscribe,
    Unsubscribe,
}

impl Mutation {
    pub fn invalidates(&self) -> &'static [Entity] {
        match self {
            Mutation::SubmitTool
            | Mutation::UpdateTool
            | Mutation::DeleteTool
            | Mutation::ApproveTool => &[
                Entity::Tools,
                Entity::Categories,
                Entity::Search,
                Entity::Analytics,
            ],
            Mutation::ToggleBookmark | Mutation::SubmitReview => &[Entity::Tools, Entity::Users],
            Mutation::SaveCategory | Mutation::DeleteCategory => {
                &[Entity::Categories, Entity::Tools]
            }
            Mutation::Subscribe | Mutation::Unsubscribe => {
                &[Entity::Newsletter, Entity::Analytics]
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, Entry<V>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value only while it is inside its stale window.
    pub fn get_fresh(&self, key: &QueryKey, now: DateTime<Utc>) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.fetched_at < key.stale_time())
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key` and drops every entry past its stale
    /// window, so keys that are never read again do not accumulate.
    pub fn insert(&mut self, key: QueryKey, value: V, now: DateTime<Utc>) {
        self.entries
            .retain(|cached, entry| now - entry.fetched_at < cached.stale_time());
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
            },
        );
    }

    /// Drops every key whose entity is `entity`, whatever its scope or params.
    pub fn invalidate_entity(&mut self, entity: Entity) {
        self.entries.retain(|key, _| key.entity != entity);
    }

    pub fn apply_mutation(&mut self, mutation: Mutation) {
        for entity in mutation.invalidates() {
            self.invalidate_entity(*entity);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
