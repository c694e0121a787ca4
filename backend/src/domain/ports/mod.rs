//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod property_command;
mod property_query;
mod property_repository;
mod store_health;

#[cfg(test)]
pub use property_command::MockPropertyCommand;
pub use property_command::PropertyCommand;
#[cfg(test)]
pub use property_query::MockPropertyQuery;
pub use property_query::PropertyQuery;
#[cfg(test)]
pub use property_repository::MockPropertyRepository;
pub use property_repository::{PropertyRepository, PropertyRepositoryError};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{FixtureStoreHealth, StoreHealth, StoreProbe, StoreState};
