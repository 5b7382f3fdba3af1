pub mod fs_store;

pub use fs_store::{FsDocumentStore, save_download};
