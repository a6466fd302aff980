pub mod columns;
pub mod delimited;
pub mod excel_read;
pub mod excel_write;
pub mod json;
pub mod paths;
