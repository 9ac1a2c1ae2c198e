//! # current-properties - Situational Character Properties
//!
//! Computes the properties a tabletop RPG character has *right now*:
//! level-based properties reduced by afflictions, by worn armor and by
//! the load of carried cargo.
//!
//! ## Core Concepts
//!
//! ```text
//! [BaseProperties + HealthState + Equipment + Cargo] → [CurrentProperties] → values
//! ```
//!
//! - **Snapshot**: [`CurrentProperties`] is built once per situation and
//!   never changes. Different armor or cargo means a new snapshot.
//! - **Guarded construction**: armor and helm are checked against the
//!   current strength and size; an unwearable armament means no snapshot.
//! - **Lazy and memoized**: every derived property is computed on first
//!   access, then served from cache.
//! - **Load malus once**: the malus from load is derived from strength
//!   before load and applied independently to strength, agility and knack.
//! - **Debug-friendly**: [`CurrentProperties::resolve`] returns the value
//!   with the contributions it was built from.
//!
//! ## Modules
//!
//! - [`property`] - Property codes and typed values
//! - [`codes`] - Armament, race and sense codes
//! - [`collaborators`] - Read-only inputs of a snapshot
//! - [`formulas`] - Compound property formulas
//! - [`current`] - The snapshot
//! - [`resolved`] - Resolved values with breakdown
//! - [`graph`] - Property dependency graph
//! - [`error`] - Error types

pub mod codes;
pub mod collaborators;
pub mod current;
pub mod error;
pub mod formulas;
pub mod graph;
pub mod property;
pub mod resolved;

// Re-export main types for convenience
pub use current::{Collaborators, CurrentProperties, Equipment};
pub use error::{BoxError, PropertyError};
pub use graph::PropertyGraph;
pub use property::{
    Age, Agility, Beauty, BodyWeightInKg, Charisma, Dangerousness, Dignity, Endurance,
    FatigueBoundary, Height, HeightInCm, Intelligence, Knack, PropertyCode, Senses, Size, Speed,
    Strength, Toughness, Weight, Will, WoundBoundary,
};
pub use resolved::{PropertySummary, ResolvedProperty};
