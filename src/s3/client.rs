//! S3 客户端模块
//!
//! 该模块负责根据 [`ConnectionInfo`] 构造 S3 客户端。构造过程只在本地完成，
//! 不会发起任何网络请求，端点是否可达要等到 [`StorageClient::ping_bucket`] 时才知道。

use crate::config::ConnectionInfo;
use crate::error::{Result, S3Error};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials, SharedHttpClient};
use http::Uri;
use tracing::debug;

/// 凭据提供者名称
const CREDENTIALS_PROVIDER_NAME: &str = "s3-connection-info";

/// 绑定到某个存储桶的 S3 客户端。
///
/// 存储桶名称初始取自 [`ConnectionInfo::bucket`]，之后可以通过
/// [`StorageClient::set_bucket`] 单独修改，不影响原来的连接信息。
#[derive(Clone, Debug)]
pub struct StorageClient {
    client: Client,
    bucket: String,
    secure: bool,
}

impl StorageClient {
    /// 使用连接信息创建 S3 客户端。
    ///
    /// 这里不会调用 [`ConnectionInfo::validate`]，字段为空时也能构造成功。
    ///
    /// # 参数
    ///
    /// * `info` - 连接信息。
    /// * `http_client` - 可选的 HTTP 客户端，`None` 表示使用 SDK 默认的 HTTP 客户端。
    ///
    /// # 返回值
    ///
    /// 配置好的 `StorageClient`。
    ///
    /// # Errors
    ///
    /// 端点不为空但格式错误时返回 [`S3Error::Client`]。
    pub fn new(info: &ConnectionInfo, http_client: Option<SharedHttpClient>) -> Result<Self> {
        let credentials = Credentials::new(
            info.access_key.clone(),
            info.secret_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        // MinIO 等兼容服务需要路径风格的寻址
        let mut builder = S3ConfigBuilder::new()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(info.region.clone()))
            .force_path_style(true);

        // 端点为空时交给 SDK 默认的端点解析
        let secure = if info.endpoint.is_empty() {
            true
        } else {
            let secure = endpoint_uses_tls(&info.endpoint)?;
            builder = builder.endpoint_url(info.endpoint.clone());
            secure
        };

        if let Some(http_client) = http_client {
            builder = builder.http_client(http_client);
        }

        let client = Client::from_conf(builder.build());

        debug!(
            endpoint = %info.endpoint,
            region = %info.region,
            bucket = %info.bucket,
            secure,
            "s3 client created"
        );

        Ok(Self {
            client,
            bucket: info.bucket.clone(),
            secure,
        })
    }

    /// 修改当前使用的存储桶，不做校验。
    pub fn set_bucket(&mut self, bucket: impl Into<String>) {
        self.bucket = bucket.into();
        debug!(bucket = %self.bucket, "s3 bucket changed");
    }

    /// 当前使用的存储桶名称。
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// 端点是否使用 TLS。
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// 底层的 SDK 客户端，用于执行数据读写等操作。
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// 检查端点格式，并根据协议判断是否使用 TLS。
///
/// # 参数
///
/// * `endpoint` - 端点 URL，例如 `http://s3:9000`。
///
/// # 返回值
///
/// 协议为 `https` 时返回 `true`，为 `http` 时返回 `false`。
fn endpoint_uses_tls(endpoint: &str) -> Result<bool> {
    let uri: Uri = endpoint
        .parse()
        .map_err(|e| S3Error::Client(format!("malformed endpoint {endpoint:?}: {e}")))?;

    let secure = match uri.scheme_str() {
        Some("https") => true,
        Some("http") => false,
        _ => {
            return Err(S3Error::Client(format!(
                "endpoint {endpoint:?} must use the http or https scheme"
            )));
        }
    };

    if uri.host().is_none_or(str::is_empty) {
        return Err(S3Error::Client(format!("endpoint {endpoint:?} has no host")));
    }

    Ok(secure)
}
