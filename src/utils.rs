pub mod logs;
pub mod scan;
