pub mod arrow;
pub mod types;
pub mod write;

pub use arrow::{build_arrow_schema, map_to_arrow_type};
pub use types::FieldMeta;
pub use write::write_schema;
