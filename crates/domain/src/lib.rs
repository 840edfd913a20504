//! # presencehub-domain
//!
//! Pure domain model for the presencehub location-automation system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Locations** (opaque place labels) and **snapshots** of where
//!   every tracked entity currently is
//! - Define **Users** (tracked entities with a notification address)
//! - Define **Automations** (location conditions → enter/leave actions) and
//!   the edge detection that decides when one fires
//! - Define the opaque **Settings** document
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod location;
pub mod settings;
pub mod user;
