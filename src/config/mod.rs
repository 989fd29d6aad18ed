//! S3 连接配置模块。
//!
//! 该模块负责从环境变量加载和校验 S3 连接信息。加载和校验是两个独立的步骤：
//! 加载时允许字段为空，由调用方显式调用 [`ConnectionInfo::validate`]。

use crate::error::{Result, S3Error};
use std::env::{self, VarError};
use std::fmt;

/// 访问密钥环境变量
pub const S3_ACCESS_KEY: &str = "S3_ACCESS_KEY";

/// 秘密密钥环境变量
pub const S3_SECRET_KEY: &str = "S3_SECRET_KEY";

/// 端点 URL 环境变量
pub const S3_ENDPOINT: &str = "S3_ENDPOINT";

/// 存储桶名称环境变量
pub const S3_BUCKET: &str = "S3_BUCKET";

/// 区域环境变量
pub const S3_REGION: &str = "S3_REGION";

/// 未配置区域时使用的默认值
pub const DEFAULT_REGION: &str = "default";

/// 连接 S3 存储桶所需的全部信息。
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ConnectionInfo {
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
}

impl ConnectionInfo {
    /// 使用给定的字段创建连接信息，不做任何校验。
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    /// 从进程环境变量加载连接信息。
    ///
    /// # 环境变量
    ///
    /// * `S3_ACCESS_KEY` - 访问密钥
    /// * `S3_SECRET_KEY` - 秘密密钥
    /// * `S3_ENDPOINT` - 端点 URL
    /// * `S3_BUCKET` - 存储桶名称
    /// * `S3_REGION` - 区域（为空时使用 `"default"`）
    ///
    /// 未设置的变量按空字符串处理，这里不调用 [`ConnectionInfo::validate`]。
    ///
    /// # Errors
    ///
    /// 当变量值不是合法的 UTF-8 时返回 [`S3Error::Config`]。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name))
    }

    /// 使用任意的变量查找函数加载连接信息。
    ///
    /// 规则与 [`ConnectionInfo::from_env`] 相同。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let read = |name: &'static str| match lookup(name) {
            Ok(value) => Ok(value),
            Err(VarError::NotPresent) => Ok(String::new()),
            Err(source) => Err(S3Error::Config { name, source }),
        };

        let access_key = read(S3_ACCESS_KEY)?;
        let secret_key = read(S3_SECRET_KEY)?;
        let endpoint = read(S3_ENDPOINT)?;
        let bucket = read(S3_BUCKET)?;
        let mut region = read(S3_REGION)?;
        if region.is_empty() {
            region = DEFAULT_REGION.to_string();
        }

        Ok(Self {
            access_key,
            secret_key,
            endpoint,
            bucket,
            region,
        })
    }

    /// 校验所有字段均不为空。
    ///
    /// 按访问密钥、秘密密钥、端点、存储桶、区域的顺序检查，返回第一个为空的字段。
    ///
    /// # Errors
    ///
    /// [`S3Error::EmptyField`]，消息形如 `s3 access key is empty`。
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("access key", &self.access_key),
            ("secret key", &self.secret_key),
            ("endpoint", &self.endpoint),
            ("bucket", &self.bucket),
            ("region", &self.region),
        ];

        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(S3Error::EmptyField(*name)),
            None => Ok(()),
        }
    }
}

// 秘密密钥不能出现在日志里
impl fmt::Debug for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret_key.is_empty() { "" } else { "****" };
        f.debug_struct("ConnectionInfo")
            .field("access_key", &self.access_key)
            .field("secret_key", &secret)
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn expected() -> ConnectionInfo {
        ConnectionInfo {
            access_key: "s3-access-key".to_string(),
            secret_key: "s3-secret-key".to_string(),
            endpoint: "http://s3:9000".to_string(),
            bucket: "tester".to_string(),
            region: "default".to_string(),
        }
    }

    /// 构造一个模拟的环境变量查找函数
    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned().ok_or(VarError::NotPresent)
    }

    fn full_env(overrides: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = [
            (S3_ACCESS_KEY, "s3-access-key"),
            (S3_SECRET_KEY, "s3-secret-key"),
            (S3_ENDPOINT, "http://s3:9000"),
            (S3_BUCKET, "tester"),
            (S3_REGION, ""),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (name, value) in overrides {
            if let Some(entry) = vars.iter_mut().find(|(k, _)| k.as_str() == *name) {
                entry.1 = value.to_string();
            }
        }
        vars
    }

    fn load(overrides: &[(&str, &str)]) -> Result<ConnectionInfo> {
        let vars = full_env(overrides);
        let pairs: Vec<(&str, &str)> = vars
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        ConnectionInfo::from_lookup(lookup_from(&pairs))
    }

    #[test]
    fn test_load_from_env_vars_happy_path() {
        let info = load(&[]).unwrap();
        assert_eq!(info, expected());
        assert_eq!(info.region, DEFAULT_REGION);
    }

    #[test]
    fn test_load_keeps_explicit_region() {
        let info = load(&[(S3_REGION, "us-west-2")]).unwrap();
        assert_eq!(info.region, "us-west-2");
    }

    #[test]
    fn test_load_with_empty_fields_does_not_validate() {
        for name in [S3_ACCESS_KEY, S3_SECRET_KEY, S3_ENDPOINT, S3_BUCKET] {
            let info = load(&[(name, "")]).unwrap();
            assert_ne!(info, expected(), "{} 为空时结果不应与期望值相等", name);
            assert!(info.validate().is_err());
        }
    }

    #[test]
    fn test_load_not_equal() {
        let info = load(&[(S3_ACCESS_KEY, "garbage")]).unwrap();
        assert_ne!(info, expected());
    }

    #[test]
    fn test_load_missing_variables_read_as_empty() {
        let info = ConnectionInfo::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(info, ConnectionInfo::new("", "", "", "", "default"));
    }

    #[test]
    fn test_load_propagates_read_failure() {
        let err = ConnectionInfo::from_lookup(|name| {
            if name == S3_BUCKET {
                Err(VarError::NotUnicode("\u{fffd}".into()))
            } else {
                Ok("value".to_string())
            }
        })
        .unwrap_err();
        assert!(matches!(err, S3Error::Config { name: S3_BUCKET, .. }));
    }

    #[test]
    fn test_new_connection_happy_path() {
        let e = expected();
        let info = ConnectionInfo::new(
            e.access_key.clone(),
            e.secret_key.clone(),
            e.endpoint.clone(),
            e.bucket.clone(),
            e.region.clone(),
        );
        assert_eq!(info, e);
    }

    #[test]
    fn test_new_connection_not_equal() {
        let e = expected();
        let info = ConnectionInfo::new(
            e.secret_key.clone(),
            e.secret_key.clone(),
            e.endpoint.clone(),
            e.bucket.clone(),
            e.region.clone(),
        );
        assert_ne!(info, e);
    }

    #[test]
    fn test_validate_happy_path() {
        assert!(expected().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid() {
        let cases = [
            (
                ConnectionInfo {
                    access_key: String::new(),
                    ..expected()
                },
                "s3 access key is empty",
            ),
            (
                ConnectionInfo {
                    secret_key: String::new(),
                    ..expected()
                },
                "s3 secret key is empty",
            ),
            (
                ConnectionInfo {
                    endpoint: String::new(),
                    ..expected()
                },
                "s3 endpoint is empty",
            ),
            (
                ConnectionInfo {
                    bucket: String::new(),
                    ..expected()
                },
                "s3 bucket is empty",
            ),
            (
                ConnectionInfo {
                    region: String::new(),
                    ..expected()
                },
                "s3 region is empty",
            ),
        ];

        for (info, message) in cases {
            let err = info.validate().unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_validate_reports_first_empty_field() {
        let info = ConnectionInfo::new("", "", "", "", "");
        assert_eq!(
            info.validate().unwrap_err().to_string(),
            "s3 access key is empty"
        );

        let info = ConnectionInfo::new("ak", "sk", "", "", "");
        assert_eq!(
            info.validate().unwrap_err().to_string(),
            "s3 endpoint is empty"
        );
    }

    #[test]
    fn test_debug_masks_secret_key() {
        let rendered = format!("{:?}", expected());
        assert!(!rendered.contains("s3-secret-key"));
        assert!(rendered.contains("s3-access-key"));
    }
}
