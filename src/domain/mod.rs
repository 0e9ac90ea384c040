pub mod media;
pub mod page;

pub use media::{MediaBlob, MediaObject, MediaRef, PutOutcome};
pub use page::{Page, PageContent, PageFilter, normalize_path};
