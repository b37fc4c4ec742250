//! # prism_ecs
//!
//! The entity/component backbone of the prism rendering engine:
//!
//! - [`Entity`] — lightweight `u64` entity identifiers.
//! - [`Component`] trait — the contract all per-entity data satisfies.
//! - [`Registry`] — owns entities and their attached components.
//!
//! The registry is deliberately small: single-process, one typed store per
//! component type. Systems (renderer, mesh batcher) borrow components from
//! it; the registry owns every component's lifetime.

pub mod component;
pub mod entity;
pub mod registry;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use registry::{Registry, RegistryError};
