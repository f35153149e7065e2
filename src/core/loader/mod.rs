pub mod builder;
pub mod context;
pub mod roots;

pub use builder::LoaderBuilder;
pub use context::{class_resource_name, IsolatedLoader, LoadedClass, LoadingContext, CLASS_SUFFIX};
pub use roots::{RootLocation, VirtualRoot};
