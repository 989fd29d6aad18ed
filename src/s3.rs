//! S3模块
//!
//! 该模块负责S3客户端的构造，以及对存储桶的连通性检查。

// 声明子模块
pub mod client;
pub mod s3_ops;

// 重新导出常用的类型
pub use client::StorageClient;
