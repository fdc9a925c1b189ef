//! Output management: turning a module's artifacts into files on disk.

mod registry;

pub use registry::{FileCategory, FileEntry, FileRegistry, PreviewEntry, WriteStats};
