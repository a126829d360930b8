//! Repository adapters implementing the InstanceRepository port.

mod in_memory;

pub use in_memory::InMemoryInstanceRepository;
