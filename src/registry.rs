//! Ability-definition registry keyed by actor type

use crate::rule::AbilityBuilder;
use crate::types::Entity;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// A registered callback that declares one actor type's rules.
///
/// Invoked once per check with the actor instance and a fresh rule builder,
/// so definitions can read live actor state on every evaluation.
pub type AbilityDefinition = Arc<dyn Fn(&dyn Entity, &mut AbilityBuilder) + Send + Sync>;

/// Process-wide store of ability definitions, keyed by actor type tag.
///
/// Explicitly constructed and explicitly reset; callers inject it (usually
/// behind an `Arc`) rather than relying on ambient module state. Absence of
/// configuration is a valid state in which every check denies.
#[derive(Default)]
pub struct AbilityRegistry {
    definitions: DashMap<String, Vec<AbilityDefinition>>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition to the ordered list for `actor_type`.
    ///
    /// Side effect only; the definition is not invoked until a check runs.
    /// Returns the registry for chaining, including chaining after `reset`.
    pub fn configure<F>(&self, actor_type: impl Into<String>, definition: F) -> &Self
    where
        F: Fn(&dyn Entity, &mut AbilityBuilder) + Send + Sync + 'static,
    {
        let actor_type = actor_type.into();
        debug!("Registering ability definition for actor type '{}'", actor_type);
        self.definitions
            .entry(actor_type)
            .or_insert_with(Vec::new)
            .push(Arc::new(definition));
        self
    }

    /// Clear every registered definition
    pub fn reset(&self) -> &Self {
        debug!("Resetting ability registry");
        self.definitions.clear();
        self
    }

    /// Ordered definitions registered for the actor's exact runtime type.
    ///
    /// Empty when nothing is registered for that type; not an error.
    pub fn definitions_for(&self, actor: &dyn Entity) -> Vec<AbilityDefinition> {
        self.definitions
            .get(actor.entity_type())
            .map(|definitions| definitions.value().clone())
            .unwrap_or_default()
    }

    /// Total number of registered definitions across all actor types
    pub fn len(&self) -> usize {
        self.definitions.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
