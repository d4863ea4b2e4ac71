pub mod value;

pub use value::{Array, Object, Pair, Value, ValueKind};
