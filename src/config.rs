use std::env;

use crate::types::{Error, Result};

/// Process configuration, read once at startup and immutable for the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws: AwsConfig,
    pub role: RoleConfig,
    pub upload: UploadConfig,
    pub notify: NotifyConfig,
}

/// Long-lived identity used only to assume the role.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone)]
pub struct RoleConfig {
    pub arn: String,
    pub session_name: String,
    /// Optional inline session policy, passed to STS verbatim. The
    /// service validates it server-side.
    pub policy: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source. `from_env` wires in
    /// the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };

        Ok(Self {
            aws: AwsConfig {
                region: required("REGION")?,
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            },
            role: RoleConfig {
                arn: required("ARN")?,
                session_name: required("ROLE_SESSION_NAME")?,
                policy: lookup("POLICY").filter(|v| !v.is_empty()),
            },
            upload: UploadConfig {
                bucket: required("BUCKET")?,
            },
            notify: NotifyConfig {
                api_url: required("API_URL")?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("REGION", "eu-central-1"),
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("ARN", "arn:aws:iam::123456789012:role/media-transfer"),
            ("ROLE_SESSION_NAME", "fh2-transfer"),
            ("POLICY", "{\"Version\":\"2012-10-17\",\"Statement\":[]}"),
            ("BUCKET", "media-bucket"),
            ("API_URL", "https://hooks.example.com/notify"),
        ])
    }

    fn from_map(map: &HashMap<&str, &str>) -> Result<Config> {
        Config::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn loads_complete_environment() {
        let config = from_map(&full_env()).unwrap();
        assert_eq!(config.aws.region, "eu-central-1");
        assert_eq!(config.role.session_name, "fh2-transfer");
        assert!(config.role.policy.is_some());
        assert_eq!(config.upload.bucket, "media-bucket");
    }

    #[test]
    fn policy_is_optional() {
        let mut env = full_env();
        env.remove("POLICY");
        let config = from_map(&env).unwrap();
        assert!(config.role.policy.is_none());
    }

    #[test]
    fn missing_arn_is_a_config_error() {
        let mut env = full_env();
        env.remove("ARN");
        let err = from_map(&env).unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("ARN")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut env = full_env();
        env.insert("BUCKET", "");
        assert!(matches!(from_map(&env), Err(Error::Config(_))));
    }
}
