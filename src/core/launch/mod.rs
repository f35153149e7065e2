pub mod entry;
pub mod task;

pub use entry::{EntryFn, EntryPoint, EntryRegistry, EntryResolver};
pub use task::Launcher;
