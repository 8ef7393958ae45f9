//! Rule definition, matching, and the registration builder

use crate::error::Result;
use crate::types::Entity;
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Action synonym: a rule registered with `"manage"` matches every requested
/// action name.
pub const MANAGE: &str = "manage";

/// Subject wildcard: a rule registered with `"all"` matches every subject
/// type.
pub const ALL: &str = "all";

/// Boxed future returned by a validator
pub type ValidatorFuture = BoxFuture<'static, Result<Value>>;

/// Validator predicate over the subject and the extra arguments passed to
/// the check, in order. Resolves to the rule's raw evaluation result.
pub type ValidatorFn = dyn Fn(&dyn Entity, &[Value]) -> ValidatorFuture + Send + Sync;

/// One or more action names accepted by rule declarations
#[derive(Debug, Clone)]
pub struct Actions(Vec<String>);

impl Actions {
    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Actions {
    fn from(action: &str) -> Self {
        Actions(vec![action.to_string()])
    }
}

impl From<String> for Actions {
    fn from(action: String) -> Self {
        Actions(vec![action])
    }
}

impl<const N: usize> From<[&str; N]> for Actions {
    fn from(actions: [&str; N]) -> Self {
        Actions(actions.iter().map(|a| a.to_string()).collect())
    }
}

impl From<&[&str]> for Actions {
    fn from(actions: &[&str]) -> Self {
        Actions(actions.iter().map(|a| a.to_string()).collect())
    }
}

impl From<Vec<&str>> for Actions {
    fn from(actions: Vec<&str>) -> Self {
        Actions(actions.iter().map(|a| a.to_string()).collect())
    }
}

impl From<Vec<String>> for Actions {
    fn from(actions: Vec<String>) -> Self {
        Actions(actions)
    }
}

/// Optional constraint attached to a rule
#[derive(Clone)]
pub enum Condition {
    /// Subject attribute equality: allows iff every key's attribute on the
    /// subject equals the mapped value
    Attributes(Map<String, Value>),

    /// Arbitrary sync or async predicate
    Validator(Arc<ValidatorFn>),
}

impl Condition {
    /// Attribute-equality condition from key/value pairs
    pub fn attributes<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Attributes(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Synchronous validator; its return value becomes the rule's result
    pub fn validator<F>(f: F) -> Self
    where
        F: Fn(&dyn Entity, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Condition::Validator(Arc::new(move |subject, extra| {
            future::ready(f(subject, extra)).boxed()
        }))
    }

    /// Asynchronous validator; the engine awaits the returned future before
    /// moving on to the next matching rule
    pub fn validator_async<F>(f: F) -> Self
    where
        F: Fn(&dyn Entity, &[Value]) -> ValidatorFuture + Send + Sync + 'static,
    {
        Condition::Validator(Arc::new(f))
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Attributes(expected) => {
                f.debug_tuple("Attributes").field(expected).finish()
            }
            Condition::Validator(_) => f.write_str("Validator(..)"),
        }
    }
}

/// The atomic permission unit: action names, a subject type, and an optional
/// condition. Append-only within one configuration pass.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Action names this rule covers; `"manage"` covers all of them
    pub actions: Vec<String>,

    /// Subject type tag, or `"all"` for any subject type
    pub subject_type: String,

    /// Absent condition means the rule allows once action and subject match
    pub condition: Option<Condition>,
}

impl Rule {
    pub fn new(
        actions: impl Into<Actions>,
        subject_type: impl Into<String>,
        condition: Option<Condition>,
    ) -> Self {
        Self {
            actions: actions.into().into_inner(),
            subject_type: subject_type.into(),
            condition,
        }
    }

    /// Whether this rule applies to the requested action and subject type,
    /// after synonym expansion
    pub fn matches(&self, action: &str, subject_type: &str) -> bool {
        let action_applies = self.actions.iter().any(|a| a == MANAGE || a == action);
        let subject_applies = self.subject_type == ALL || self.subject_type == subject_type;
        action_applies && subject_applies
    }

    /// Evaluate this rule's condition against the subject and extra
    /// arguments, awaiting asynchronous validators
    pub async fn evaluate(&self, subject: &dyn Entity, extra: &[Value]) -> Result<Value> {
        match &self.condition {
            None => Ok(Value::Bool(true)),
            Some(Condition::Attributes(expected)) => {
                let matched = expected
                    .iter()
                    .all(|(key, value)| subject.attribute(key).as_ref() == Some(value));
                Ok(Value::Bool(matched))
            }
            Some(Condition::Validator(validator)) => validator.as_ref()(subject, extra).await,
        }
    }
}

/// Rule collector passed to ability definitions.
///
/// Inside a definition body, `can` and `add_rule` are aliases: both append a
/// rule to the list scoped to the current check.
#[derive(Debug, Default)]
pub struct AbilityBuilder {
    rules: Vec<Rule>,
}

impl AbilityBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declare a rule. `condition` accepts `None` for unconditional rules or
    /// a [`Condition`] directly.
    pub fn can(
        &mut self,
        actions: impl Into<Actions>,
        subject_type: impl Into<String>,
        condition: impl Into<Option<Condition>>,
    ) -> &mut Self {
        self.rules
            .push(Rule::new(actions, subject_type, condition.into()));
        self
    }

    /// Alias for [`AbilityBuilder::can`]
    pub fn add_rule(
        &mut self,
        actions: impl Into<Actions>,
        subject_type: impl Into<String>,
        condition: impl Into<Option<Condition>>,
    ) -> &mut Self {
        self.can(actions, subject_type, condition)
    }

    /// Rules declared so far, in call order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}
