//! # Abilities
//!
//! In-process authorization rule engine: given an actor, an action name, and
//! a subject, it decides whether the action is permitted.
//!
//! Rules are registered per actor type through [`AbilityRegistry::configure`]
//! and evaluated lazily at check time by the [`AbilityEngine`]. The engine
//! expands the `"manage"` action and `"all"` subject synonyms, applies
//! per-rule conditions (attribute equality or sync/async validators), and
//! resolves precedence by letting the last matching rule win.
//!
//! ## Example
//!
//! ```rust
//! use abilities::{AbilityEngine, AbilityRegistry, Condition, Entity};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct User;
//!
//! struct Product {
//!     published: bool,
//! }
//!
//! impl Entity for User {
//!     fn entity_type(&self) -> &str {
//!         "user"
//!     }
//! }
//!
//! impl Entity for Product {
//!     fn entity_type(&self) -> &str {
//!         "product"
//!     }
//!
//!     fn attribute(&self, key: &str) -> Option<Value> {
//!         match key {
//!             "published" => Some(json!(self.published)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> abilities::Result<()> {
//! let registry = Arc::new(AbilityRegistry::new());
//! registry.configure("user", |_actor, rules| {
//!     rules.can("read", "product", Condition::attributes([("published", true)]));
//! });
//!
//! let engine = AbilityEngine::new(registry);
//!
//! let outcome = engine.can(&User, "read", &Product { published: true }, &[]).await?;
//! assert_eq!(outcome, json!(true));
//!
//! let denied = engine.cannot(&User, "read", &Product { published: false }, &[]).await?;
//! assert!(denied);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod registry;
pub mod rule;
pub mod types;

// Re-export commonly used types
pub use engine::AbilityEngine;
pub use error::{AuthzError, Denial, DenialKind, Result};
pub use registry::{AbilityDefinition, AbilityRegistry};
pub use rule::{
    AbilityBuilder, Actions, Condition, Rule, ValidatorFn, ValidatorFuture, ALL, MANAGE,
};
pub use types::{is_truthy, Entity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
