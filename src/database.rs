pub mod connection;
pub mod dto;
pub mod repository;
pub mod store;

// 重新导出连接管理函数方便使用
pub use connection::*;
