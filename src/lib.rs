//! S3 连接配置与健康检查库
//!
//! 主要功能包括：
//! - 从环境变量加载 S3 连接信息（区域为空时使用 `"default"`）
//! - 校验连接信息的各个字段
//! - 构造绑定到存储桶的 S3 客户端
//! - 检查存储桶是否可达
//!
//! ```rust,no_run
//! use s3_connection::{ConnectionInfo, StorageClient};
//!
//! # async fn run() -> Result<(), s3_connection::S3Error> {
//! let info = ConnectionInfo::from_env()?;
//! info.validate()?;
//!
//! let client = StorageClient::new(&info, None)?;
//! client.ping_bucket().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod s3;

pub use config::ConnectionInfo;
pub use error::{Result, S3Error};
pub use s3::StorageClient;
