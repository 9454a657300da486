//! Card templates and the pool the board generator draws from.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Static face data (pair key + flavor)
//! - `TemplatePool`: Registry of candidate templates
//!
//! Runtime card state lives in `core::card`; templates never change
//! during a session.

pub mod template;

pub use template::{CardTemplate, TemplatePool};
