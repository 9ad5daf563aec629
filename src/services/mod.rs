//! Resort services: directory lookup, payload transform and the polling fetcher

pub mod reading_registry;
pub mod readings;
pub mod resort_data;
pub mod resort_directory;
pub mod resort_transform;
pub mod sensor_entity;

pub use reading_registry::{DeviceClass, ReadingRegistry, RegistryEntry, StateClass};
pub use readings::{Reading, ReadingSet, ReadingValue};
pub use resort_data::{RefreshOutcome, ResortDataFetcher};
pub use resort_directory::{ResortDirectory, ResortRef};
pub use resort_transform::{LiftStatus, ResortTransform};
pub use sensor_entity::ResortSensor;
