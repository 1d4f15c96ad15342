pub mod field_set;
pub mod field_utils;
