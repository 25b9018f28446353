//! Component trait and implementations

/// Marker trait for components
///
/// Only types implementing this can be placed in a [`ComponentStore`](super::ComponentStore);
/// the store itself is never instantiated without a concrete component type.
pub trait Component: 'static + Send + Sync {}

impl Component for crate::physics::Movable {}
