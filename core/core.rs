pub mod config;
pub mod error;
pub mod ext;
pub mod extract;
pub mod ignore_list;
pub mod render;
pub mod selection;
pub mod session;
pub mod source;
pub mod tree;

pub use config::{Config, DEFAULT_PORT, IgnoreConfig, ServerConfig};
pub use error::{AppError, Result};
pub use ext::{collect_extensions, extension_of};
pub use extract::{BLOCK_DELIMITER, extract_selected};
pub use ignore_list::IgnoreSet;
pub use render::tree_to_text;
pub use selection::{CheckState, SelectionSet};
pub use session::Session;
pub use source::{ContentRef, DiskSource, MemorySource, SourceEntry, TreeSource};
pub use tree::{NodeKind, TreeNode, build_tree};
