// src/schema/types.rs

use serde::{Deserialize, Serialize};

use crate::frame::DType;

/// A single column descriptor: name plus inferred dtype.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct FieldMeta {
    pub name: String,
    pub dtype: DType,
}
