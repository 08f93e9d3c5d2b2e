//! Storage policy table.
//!
//! Everything that varies with the storage kind lives in one row of
//! [`POLICIES`]; resolvers read the row instead of branching on the kind.

use crate::codegen::kinds::{DatabaseType, ModelKind, StorageType};

/// Which persistence adapters an entity test wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAdapters {
    None,
    /// One adapter for the aggregate state
    State,
    /// One adapter per domain event
    Events,
}

/// Per-storage-kind generation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoragePolicy {
    pub kind: StorageType,
    pub entity_template: &'static str,
    pub state_template: &'static str,
    pub adapter_template: Option<&'static str>,
    pub state_imports: &'static [&'static str],
    pub event_sourced: bool,
    /// Store provider of this kind; names command-side providers and their template
    pub store_provider: &'static str,
    pub query_store_provider: &'static str,
    /// Kind the query model is stored with
    pub query_storage: StorageType,
    pub in_memory_store_actor: &'static str,
    pub jdbc_store_actor: &'static str,
    pub entity_adapters: EntityAdapters,
}

pub const POLICIES: [StoragePolicy; 3] = [
    StoragePolicy {
        kind: StorageType::ObjectStore,
        entity_template: "ObjectEntity",
        state_template: "StateObject",
        adapter_template: None,
        state_imports: &["io.vlingo.xoom.symbio.store.object.StateObject"],
        event_sourced: false,
        store_provider: "ObjectStoreProvider",
        query_store_provider: "QueryModelObjectStoreProvider",
        query_storage: StorageType::ObjectStore,
        in_memory_store_actor: "InMemoryObjectStoreActor",
        jdbc_store_actor: "JDBCObjectStoreActor",
        entity_adapters: EntityAdapters::None,
    },
    StoragePolicy {
        kind: StorageType::StateStore,
        entity_template: "StatefulEntity",
        state_template: "StateObject",
        adapter_template: Some("StateAdapter"),
        state_imports: &[
            "io.vlingo.xoom.symbio.State",
            "io.vlingo.xoom.symbio.StateAdapter",
        ],
        event_sourced: false,
        store_provider: "StateStoreProvider",
        query_store_provider: "StateStoreProvider",
        query_storage: StorageType::StateStore,
        in_memory_store_actor: "InMemoryStateStoreActor",
        jdbc_store_actor: "JDBCStateStoreActor",
        entity_adapters: EntityAdapters::State,
    },
    StoragePolicy {
        kind: StorageType::Journal,
        entity_template: "EventSourcedEntity",
        state_template: "PlainState",
        adapter_template: None,
        state_imports: &["io.vlingo.xoom.symbio.Source"],
        event_sourced: true,
        store_provider: "JournalProvider",
        query_store_provider: "QueryModelJournalProvider",
        // Journals only back the command side.
        query_storage: StorageType::StateStore,
        in_memory_store_actor: "InMemoryJournalActor",
        jdbc_store_actor: "JDBCJournalActor",
        entity_adapters: EntityAdapters::Events,
    },
];

/// The policy row for a storage kind.
pub fn policy(kind: StorageType) -> &'static StoragePolicy {
    match kind {
        StorageType::ObjectStore => &POLICIES[0],
        StorageType::StateStore => &POLICIES[1],
        StorageType::Journal => &POLICIES[2],
    }
}

impl StorageType {
    pub fn policy(&self) -> &'static StoragePolicy {
        policy(*self)
    }

    pub fn is_sourced(&self) -> bool {
        self.policy().event_sourced
    }
}

impl StoragePolicy {
    /// Template id of the store provider for one side of the model.
    pub fn store_provider_template(&self, model: ModelKind) -> &'static str {
        match model {
            ModelKind::Command => self.store_provider,
            ModelKind::Query => self.query_store_provider,
        }
    }

    /// Storage kind actually used by one side of the model.
    pub fn storage_for(&self, model: ModelKind) -> StorageType {
        match model {
            ModelKind::Command => self.kind,
            ModelKind::Query => self.query_storage,
        }
    }

    /// Class name of the store provider for one side of the model.
    pub fn store_provider_classname(&self, model: ModelKind) -> String {
        format!(
            "{}{}",
            model.prefix(),
            policy(self.storage_for(model)).store_provider
        )
    }

    /// Store actor class of this kind on a database.
    pub fn store_actor(&self, database: DatabaseType) -> &'static str {
        if database.is_in_memory() {
            self.in_memory_store_actor
        } else {
            self.jdbc_store_actor
        }
    }
}
