//! Check evaluation: `can`, `cannot`, and the strict `authorize`

use crate::error::{AuthzError, Denial, Result};
use crate::registry::AbilityRegistry;
use crate::rule::AbilityBuilder;
use crate::types::{is_truthy, Entity};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Evaluates permission checks against an injected [`AbilityRegistry`].
///
/// The engine keeps no state across calls: every check re-invokes the
/// applicable ability definitions and rebuilds the rule list, because
/// definitions may read live actor attributes.
#[derive(Clone)]
pub struct AbilityEngine {
    registry: Arc<AbilityRegistry>,
}

impl AbilityEngine {
    pub fn new(registry: Arc<AbilityRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this engine evaluates against
    pub fn registry(&self) -> &AbilityRegistry {
        &self.registry
    }

    /// Evaluate whether `actor` may perform `action` on `subject`.
    ///
    /// Matching rules are evaluated in registration order and the last
    /// matching rule's result becomes the outcome; there is no short-circuit
    /// on an earlier allow, so a later rule can override an earlier one.
    /// Returns `false` when no rule matched.
    ///
    /// The outcome is the last validator's raw return value, not coerced to
    /// a boolean: a truthy non-boolean result (for example a message string)
    /// is returned verbatim.
    pub async fn can(
        &self,
        actor: &dyn Entity,
        action: &str,
        subject: &dyn Entity,
        extra: &[Value],
    ) -> Result<Value> {
        let definitions = self.registry.definitions_for(actor);
        debug!(
            "Checking '{}' on '{}' for actor type '{}' ({} definition(s))",
            action,
            subject.entity_type(),
            actor.entity_type(),
            definitions.len()
        );

        let mut builder = AbilityBuilder::new();
        for definition in &definitions {
            definition.as_ref()(actor, &mut builder);
        }
        let rules = builder.into_rules();

        let subject_type = subject.entity_type();
        let mut outcome = None;
        for rule in rules.iter().filter(|rule| rule.matches(action, subject_type)) {
            let result = rule.evaluate(subject, extra).await?;
            debug!(
                "Rule {:?} on '{}' evaluated to {}",
                rule.actions, rule.subject_type, result
            );
            outcome = Some(result);
        }

        match outcome {
            Some(result) => Ok(result),
            None => {
                debug!("No rule matched '{}' on '{}'", action, subject_type);
                Ok(Value::Bool(false))
            }
        }
    }

    /// Strict boolean negation of the truthiness of [`AbilityEngine::can`]
    pub async fn cannot(
        &self,
        actor: &dyn Entity,
        action: &str,
        subject: &dyn Entity,
        extra: &[Value],
    ) -> Result<bool> {
        let outcome = self.can(actor, action, subject, extra).await?;
        Ok(!is_truthy(&outcome))
    }

    /// Authorize-or-fail: returns the subject unchanged when the outcome is
    /// exactly `true`, otherwise raises [`AuthzError::Unauthorized`] carrying
    /// the exact evaluation result of the last matching rule (`false` when
    /// none matched).
    ///
    /// Unlike [`AbilityEngine::can`], which leaves truth-testing to the
    /// caller, the strict variant treats any non-`true` result as a denial so
    /// validators can return a descriptive value (such as a message string)
    /// and have it surface as the denial reason.
    pub async fn authorize<'s, S: Entity>(
        &self,
        actor: &dyn Entity,
        action: &str,
        subject: &'s S,
        extra: &[Value],
    ) -> Result<&'s S> {
        let outcome = self.can(actor, action, subject, extra).await?;
        if outcome == Value::Bool(true) {
            Ok(subject)
        } else {
            debug!("Authorization denied with result {}", outcome);
            Err(AuthzError::Unauthorized(Denial::new(outcome)))
        }
    }
}

impl Default for AbilityEngine {
    fn default() -> Self {
        Self::new(Arc::new(AbilityRegistry::new()))
    }
}
