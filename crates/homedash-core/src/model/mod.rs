// ── Domain model ──
//
// Cache keys, cached values, and the service/container descriptors the
// core derives from wire types.

mod container;
mod key;
mod service;
mod value;

pub use container::{ContainerDescriptor, ContainerState};
pub use key::{ResourceKey, ResourceKind};
pub use service::ServiceDescriptor;
pub use value::{Resource, ResourceValue};
