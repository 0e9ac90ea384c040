pub mod breadcrumbs;
pub mod content;
pub mod fetch;
pub mod generate;
pub mod media;
pub mod render;

pub use content::ContentRecordStore;
pub use media::MediaStore;
pub use render::PageRenderer;
