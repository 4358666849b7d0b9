pub mod result_set;
pub mod row;

pub use result_set::{ResultMeta, ResultSet};
pub use row::CustomDbRow;
