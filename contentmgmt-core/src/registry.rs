//! The content type registry.

use crate::crud::ContentCrud;
use crate::error::{CoreError, CoreResult};
use crate::event_bus::EventBus;
use crate::storage::ContentStorage;
use contentmgmt_types::{ContentTypeId, Event, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Version metadata of a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub latest: Version,
}

/// What a plugin hands to [`ContentRegistry::register`].
#[derive(Clone)]
pub struct ContentTypeDefinition {
    pub id: ContentTypeId,
    pub storage: Arc<dyn ContentStorage>,
    pub version: VersionInfo,
}

impl ContentTypeDefinition {
    pub fn new(id: ContentTypeId, storage: Arc<dyn ContentStorage>, latest: Version) -> Self {
        Self {
            id,
            storage,
            version: VersionInfo { latest },
        }
    }

    /// Builds a definition from unchecked parts (e.g. configuration).
    pub fn from_parts(id: &str, storage: Arc<dyn ContentStorage>, latest: u32) -> CoreResult<Self> {
        let content_type_id = ContentTypeId::new(id).map_err(|e| CoreError::invalid(id, e))?;
        let latest = Version::new(latest).map_err(|e| CoreError::invalid(id, e))?;
        Ok(Self::new(content_type_id, storage, latest))
    }
}

impl fmt::Debug for ContentTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentTypeDefinition")
            .field("id", &self.id)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// A registered content type.
#[derive(Debug)]
pub struct ContentType {
    definition: ContentTypeDefinition,
    crud: ContentCrud,
}

impl ContentType {
    #[must_use]
    pub fn id(&self) -> &ContentTypeId {
        &self.definition.id
    }

    #[must_use]
    pub fn latest_version(&self) -> Version {
        self.definition.version.latest
    }

    #[must_use]
    pub fn definition(&self) -> &ContentTypeDefinition {
        &self.definition
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn ContentStorage> {
        &self.definition.storage
    }

    /// Storage access that publishes item lifecycle events.
    #[must_use]
    pub fn crud(&self) -> &ContentCrud {
        &self.crud
    }
}

/// What `register` does when the id is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Last writer wins.
    #[default]
    Replace,
    /// Fail with `DuplicateOrInvalidDescriptor`.
    Reject,
}

/// Maps content type ids to their registered definitions.
pub struct ContentRegistry {
    types: RwLock<HashMap<ContentTypeId, Arc<ContentType>>>,
    event_bus: Arc<EventBus>,
    duplicate_policy: DuplicatePolicy,
}

impl ContentRegistry {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self::with_duplicate_policy(event_bus, DuplicatePolicy::default())
    }

    pub fn with_duplicate_policy(event_bus: Arc<EventBus>, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
            event_bus,
            duplicate_policy,
        }
    }

    #[must_use]
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    #[must_use]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Registers a content type, replacing or rejecting an existing entry
    /// with the same id according to the duplicate policy. Publishes
    /// `ContentTypeRegistered` on success.
    pub fn register(&self, definition: ContentTypeDefinition) -> CoreResult<()> {
        let id = definition.id.clone();
        let latest = definition.version.latest;
        let crud = ContentCrud::new(
            id.clone(),
            Arc::clone(&definition.storage),
            Arc::clone(&self.event_bus),
        );
        let content_type = Arc::new(ContentType { definition, crud });

        let replaced = {
            let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
            if types.contains_key(&id) && self.duplicate_policy == DuplicatePolicy::Reject {
                warn!(content_type = %id, "rejected duplicate registration");
                return Err(CoreError::duplicate(id.as_str()));
            }
            types.insert(id.clone(), content_type).is_some()
        };

        info!(content_type = %id, latest_version = %latest, replaced, "content type registered");
        self.event_bus.publish(Event::registered(id, latest, replaced));
        Ok(())
    }

    /// Looks up a content type by exact id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<ContentType>> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Removes a content type. Publishes `ContentTypeUnregistered` when an
    /// entry was removed.
    pub fn unregister(&self, id: &str) -> Option<Arc<ContentType>> {
        let removed = self
            .types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if let Some(content_type) = &removed {
            info!(content_type = %id, "content type unregistered");
            self.event_bus
                .publish(Event::unregistered(content_type.id().clone()));
        }
        removed
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<ContentTypeId> {
        let mut ids: Vec<_> = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentRegistry")
            .field("ids", &self.ids())
            .field("duplicate_policy", &self.duplicate_policy)
            .finish()
    }
}
