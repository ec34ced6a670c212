// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use std::sync::Arc;

use super::types::FieldMeta;
use crate::frame::DType;

/// Map a frame dtype into an Arrow DataType. Every column is nullable:
/// absent cells become Arrow nulls.
pub fn map_to_arrow_type(dtype: DType) -> DataType {
    match dtype {
        DType::Int64 => DataType::Int64,
        DType::Float64 => DataType::Float64,
        DType::Date => DataType::Date32,
        DType::Utf8 => DataType::Utf8,
    }
}

/// Build an ArrowSchema (inside an Arc) from a slice of `FieldMeta`s.
pub fn build_arrow_schema(fields: &[FieldMeta]) -> Arc<ArrowSchema> {
    let fields: Vec<ArrowField> = fields
        .iter()
        .map(|f| ArrowField::new(&f.name, map_to_arrow_type(f.dtype), true))
        .collect();

    Arc::new(ArrowSchema::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_dtype() {
        assert_eq!(map_to_arrow_type(DType::Int64), DataType::Int64);
        assert_eq!(map_to_arrow_type(DType::Float64), DataType::Float64);
        assert_eq!(map_to_arrow_type(DType::Date), DataType::Date32);
        assert_eq!(map_to_arrow_type(DType::Utf8), DataType::Utf8);
    }

    #[test]
    fn schema_fields_are_nullable_and_ordered() {
        let metas = vec![
            FieldMeta {
                name: "year".into(),
                dtype: DType::Int64,
            },
            FieldMeta {
                name: "make".into(),
                dtype: DType::Utf8,
            },
        ];
        let schema = build_arrow_schema(&metas);
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.field(0).name(), "year");
        assert_eq!(schema.field(1).name(), "make");
        assert!(schema.field(0).is_nullable());
    }
}
