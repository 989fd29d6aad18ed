//! S3操作模块
//!
//! 该模块负责处理与S3存储桶的交互操作。

use crate::error::{Result, S3Error};
use crate::s3::client::StorageClient;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use tracing::{debug, warn};

impl StorageClient {
    /// 检查当前存储桶是否存在且可以访问。
    ///
    /// 对当前存储桶发送一次 `HeadBucket` 请求，这是唯一会访问网络的操作。
    ///
    /// # 返回值
    ///
    /// 存储桶存在且可访问时返回 `Ok(())`。
    ///
    /// # Errors
    ///
    /// * [`S3Error::Connectivity`] - 无法连接到端点，或端点返回 5xx。
    /// * [`S3Error::BucketNotFound`] - 存储桶不存在或无权访问（4xx）。
    /// * [`S3Error::Client`] - 无法构造请求。
    pub async fn ping_bucket(&self) -> Result<()> {
        let bucket = self.bucket();

        let result = self.inner().head_bucket().bucket(bucket).send().await;

        match result {
            Ok(_) => {
                debug!(bucket, "s3 bucket is reachable");
                Ok(())
            }
            Err(err) => {
                let err = classify_head_bucket_error(bucket, err);
                warn!(bucket, error = %err, "s3 bucket ping failed");
                Err(err)
            }
        }
    }
}

/// 将 SDK 返回的错误映射为 [`S3Error`]。
///
/// 4xx 响应视为存储桶不存在或无权访问，5xx 响应和无法发出请求都视为连接问题。
fn classify_head_bucket_error(bucket: &str, err: SdkError<HeadBucketError>) -> S3Error {
    let message = DisplayErrorContext(&err).to_string();

    match err {
        SdkError::ServiceError(ctx) if ctx.raw().status().as_u16() < 500 => {
            S3Error::BucketNotFound {
                bucket: bucket.to_string(),
                message,
            }
        }
        SdkError::ConstructionFailure(_) => S3Error::Client(message),
        _ => S3Error::Connectivity {
            bucket: bucket.to_string(),
            message,
        },
    }
}
