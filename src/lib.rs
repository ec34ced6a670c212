pub mod export;
pub mod frame;
pub mod load;
pub mod reshape;
pub mod schema;
pub mod stats;

pub use frame::{DType, Frame, FrameError, Value};
pub use load::{read_csv, LoadError};
