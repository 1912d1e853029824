// Language descriptors and the registry that holds them

pub mod builtin;
pub mod descriptor;
pub mod registry;

pub use builtin::builtin_descriptors;
pub use descriptor::{CommandTemplate, LanguageDescriptor};
pub use registry::LanguageRegistry;
