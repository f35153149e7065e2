pub mod registry;
pub mod resolver;
pub mod uri;

pub use registry::HandlerRegistry;
pub use resolver::{open_nested_archive, JarInJarResolver, ProtocolHandler};
pub use uri::{VirtualUri, NESTED_SEPARATOR};
