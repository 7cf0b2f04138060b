pub mod registry;

pub use registry::InMemoryRegistryRepository;
