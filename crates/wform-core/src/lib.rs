#![forbid(unsafe_code)]

//! Core data model for wform.
//!
//! This crate holds the plain data that flows between the schema layer, the
//! state engine, and the renderers:
//!
//! - [`Webform`] / [`WebformElement`]: the form schema as delivered by the CMS.
//! - [`StateDeclaration`] / [`ConditionSet`]: conditional rules attached to an
//!   element.
//! - [`StateMapping`]: the aggregated boolean outcome per state name.
//! - [`DenormalizedElement`]: an element with its name/value attribute lists
//!   flattened into maps.
//! - [`FormConfig`]: endpoint and submission settings.

pub mod condition;
pub mod config;
pub mod declaration;
pub mod denormalize;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod schema;

pub use condition::{Condition, ConditionSet, ConditionValue};
pub use config::FormConfig;
pub use declaration::StateDeclaration;
pub use denormalize::{AttrValue, AttributeMap, DenormalizedElement, denormalize};
pub use error::{ConfigError, SchemaError};
pub use ids::{element_id, option_id};
pub use mapping::StateMapping;
pub use schema::{ElementAttribute, ElementOption, Webform, WebformElement};
