//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use tracing_subscriber::{fmt, EnvFilter};

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Reads a required setting, falling back to `default` in development
    fn setting(&self, name: &str, default: &str) -> String {
        match self {
            Self::Production | Self::Staging => env::var(name)
                .unwrap_or_else(|_| panic!("{name} environment variable is not set")),
            Self::Development => env::var(name).unwrap_or_else(|_| default.to_string()),
        }
    }

    /// Returns the AWS region shared by the S3 and `DynamoDB` clients
    ///
    /// # Panics
    ///
    /// Panics if `AWS_REGION` is not set outside development
    #[must_use]
    pub fn aws_region(&self) -> String {
        self.setting("AWS_REGION", "us-east-1")
    }

    /// Returns the `DynamoDB` table that stores property records
    ///
    /// # Panics
    ///
    /// Panics if `TABLE_NAME` is not set outside development
    #[must_use]
    pub fn table_name(&self) -> String {
        self.setting("TABLE_NAME", "properties")
    }

    /// Returns the S3 bucket that receives property images
    ///
    /// # Panics
    ///
    /// Panics if `BUCKET_NAME` is not set outside development
    #[must_use]
    pub fn s3_bucket(&self) -> String {
        self.setting("BUCKET_NAME", "property-images")
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws_region()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration derived from the shared AWS configuration
    #[must_use]
    pub fn s3_client_config(&self, aws_config: &aws_config::SdkConfig) -> aws_sdk_s3::Config {
        let s3_config: aws_sdk_s3::Config = aws_config.into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Log filter used when `RUST_LOG` is not set
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Production | Self::Staging => "info",
            Self::Development => "debug",
        }
    }

    /// Installs the global tracing subscriber
    ///
    /// JSON output for staging/production (log aggregation), human readable
    /// output for development.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_log_filter()));

        match self {
            Self::Production | Self::Staging => {
                fmt().json().with_env_filter(filter).init();
            }
            Self::Development => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
