//! 错误类型模块
//!
//! 该模块定义了加载配置、校验配置、构造客户端以及探测存储桶时可能出现的错误。

use std::env::VarError;
use thiserror::Error;

/// S3 连接相关的错误。
#[derive(Error, Debug)]
pub enum S3Error {
    /// 读取环境变量失败（例如变量值不是合法的 UTF-8）。
    #[error("failed to read environment variable {name}: {source}")]
    Config {
        name: &'static str,
        #[source]
        source: VarError,
    },

    /// 必填字段为空，消息格式固定为 `s3 <字段> is empty`。
    #[error("s3 {0} is empty")]
    EmptyField(&'static str),

    /// 客户端构造参数被拒绝。
    #[error("invalid s3 client configuration: {0}")]
    Client(String),

    /// 无法连接到端点。
    #[error("s3 endpoint unreachable while checking bucket {bucket}: {message}")]
    Connectivity { bucket: String, message: String },

    /// 存储桶不存在或无权访问。
    #[error("s3 bucket {bucket} not found or not accessible: {message}")]
    BucketNotFound { bucket: String, message: String },
}

/// 本 crate 使用的 `Result` 别名。
pub type Result<T> = std::result::Result<T, S3Error>;
