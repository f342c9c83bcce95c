//! Structure construction
//!
//! The model never builds a child instance itself: every creation goes
//! through the [`StructureFactory`] contract, and the mapping from type tag
//! to concrete type is supplied by the embedding system — usually resolved
//! per protocol version. A closure-based [`FactoryRegistry`] is provided as
//! the common implementation.

#![warn(missing_docs)]

pub mod factory;

pub use factory::{CreationContext, FactoryRegistry, StructureFactory};
