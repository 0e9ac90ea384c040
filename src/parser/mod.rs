pub mod fields;
pub mod markdown;
