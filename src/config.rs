// Copyright 2024 Dmitry Tantsur <divius.inside@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client configuration.
//!
//! A configuration is created once and then shared (read-only) by all calls
//! made through a [Cloud](../struct.Cloud.html).

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

use super::{Error, ErrorKind, Result};

const DEFAULT_POLL_TIMEOUT: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT: u64 = 60;
const DEFAULT_POLL_DELAY: u64 = 1;
const DEFAULT_MAX_POLL_DELAY: u64 = 15;

/// Connection settings for a CloudStack management server.
#[derive(Clone)]
pub struct Config {
    api_url: Url,
    api_key: String,
    secret_key: String,
    verify_ssl: bool,
    async_mode: bool,
    poll_timeout: Option<Duration>,
    poll_delay: Duration,
    max_poll_delay: Duration,
    request_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
struct CloudEntry {
    api_url: String,
    api_key: String,
    secret_key: String,
    #[serde(default)]
    verify_ssl: Option<bool>,
    #[serde(default, rename = "async")]
    async_mode: Option<bool>,
    #[serde(default)]
    timeout: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Root {
    clouds: HashMap<String, CloudEntry>,
}

impl Config {
    /// Create a configuration with default settings.
    ///
    /// The URL is the API endpoint, e.g. `https://cloud.example.com/client/api`.
    pub fn new<U, K, S>(api_url: U, api_key: K, secret_key: S) -> Result<Config>
    where
        U: AsRef<str>,
        K: Into<String>,
        S: Into<String>,
    {
        let api_url = Url::parse(api_url.as_ref()).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Invalid API URL {}: {}", api_url.as_ref(), e),
            )
        })?;
        Ok(Config {
            api_url,
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            verify_ssl: true,
            async_mode: true,
            poll_timeout: Some(Duration::from_secs(DEFAULT_POLL_TIMEOUT)),
            poll_delay: Duration::from_secs(DEFAULT_POLL_DELAY),
            max_poll_delay: Duration::from_secs(DEFAULT_MAX_POLL_DELAY),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `CLOUDSTACK_API_URL`, `CLOUDSTACK_API_KEY` and
    /// `CLOUDSTACK_SECRET_KEY` (required) as well as `CLOUDSTACK_VERIFY_SSL`,
    /// `CLOUDSTACK_ASYNC` and `CLOUDSTACK_TIMEOUT` (optional).
    pub fn from_env() -> Result<Config> {
        let config = Config::new(
            required_var("CLOUDSTACK_API_URL")?,
            required_var("CLOUDSTACK_API_KEY")?,
            required_var("CLOUDSTACK_SECRET_KEY")?,
        )?;
        let config = match env::var("CLOUDSTACK_VERIFY_SSL") {
            Ok(value) => config.with_verify_ssl(parse_bool("CLOUDSTACK_VERIFY_SSL", &value)?),
            Err(..) => config,
        };
        let config = match env::var("CLOUDSTACK_ASYNC") {
            Ok(value) => config.with_async(parse_bool("CLOUDSTACK_ASYNC", &value)?),
            Err(..) => config,
        };
        Ok(match env::var("CLOUDSTACK_TIMEOUT") {
            Ok(value) => {
                let secs = value.trim().parse::<i64>().map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidConfig,
                        format!("Invalid CLOUDSTACK_TIMEOUT {}: {}", value, e),
                    )
                })?;
                config.with_poll_timeout_secs(secs)
            }
            Err(..) => config,
        })
    }

    /// Create a configuration from the `cloudstack.yaml` file.
    ///
    /// The file is searched for in the current directory, then in
    /// `~/.config/cloudstack/` and finally in `/etc/cloudstack/`.
    pub fn from_config<S: AsRef<str>>(cloud_name: S) -> Result<Config> {
        let path = find_config().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                "cloudstack.yaml was not found in any location",
            )
        })?;
        Config::from_file(path, cloud_name)
    }

    /// Create a configuration from an explicit YAML file.
    pub fn from_file<P, S>(path: P, cloud_name: S) -> Result<Config>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let file = File::open(path.as_ref()).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot read {:?}: {}", path.as_ref(), e),
            )
        })?;
        let mut root: Root = serde_yaml::from_reader(file).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot parse {:?}: {}", path.as_ref(), e),
            )
        })?;

        let name = cloud_name.as_ref();
        let cloud = root.clouds.remove(name).ok_or_else(|| {
            Error::new(ErrorKind::InvalidConfig, format!("No such cloud: {}", name))
        })?;

        let mut config = Config::new(&cloud.api_url, cloud.api_key, cloud.secret_key)?;
        if let Some(verify_ssl) = cloud.verify_ssl {
            config = config.with_verify_ssl(verify_ssl);
        }
        if let Some(async_mode) = cloud.async_mode {
            config = config.with_async(async_mode);
        }
        if let Some(timeout) = cloud.timeout {
            config = config.with_poll_timeout_secs(timeout);
        }
        Ok(config)
    }

    /// Whether to verify TLS certificates (the default).
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Config {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Whether to wait for asynchronous jobs to finish (the default).
    ///
    /// With asynchronous mode disabled, asynchronous operations return the
    /// initial response containing the job ID.
    pub fn with_async(mut self, async_mode: bool) -> Config {
        self.async_mode = async_mode;
        self
    }

    /// Set the time to wait for asynchronous jobs, `None` to wait forever.
    pub fn with_poll_timeout(mut self, timeout: Option<Duration>) -> Config {
        self.poll_timeout = timeout;
        self
    }

    /// Set the time to wait for asynchronous jobs in seconds.
    ///
    /// Zero or a negative value means waiting forever.
    pub fn with_poll_timeout_secs(self, timeout: i64) -> Config {
        let timeout = if timeout > 0 {
            Some(Duration::from_secs(timeout as u64))
        } else {
            None
        };
        self.with_poll_timeout(timeout)
    }

    /// Set the initial and the maximum delay between job status queries.
    ///
    /// The delay starts at `initial` and grows by `initial` after every
    /// query until it reaches `max`.
    pub fn with_poll_delay(mut self, initial: Duration, max: Duration) -> Config {
        self.poll_delay = initial;
        self.max_poll_delay = std::cmp::max(initial, max);
        self
    }

    /// Set the timeout for individual HTTP requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Config {
        self.request_timeout = timeout;
        self
    }

    /// API endpoint.
    #[inline]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// API key.
    #[inline]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[inline]
    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Whether TLS certificates are verified.
    #[inline]
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Whether asynchronous jobs are awaited.
    #[inline]
    pub fn async_mode(&self) -> bool {
        self.async_mode
    }

    /// Time to wait for asynchronous jobs (`None` means forever).
    #[inline]
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.poll_timeout
    }

    /// Initial delay between job status queries.
    #[inline]
    pub fn poll_delay(&self) -> Duration {
        self.poll_delay
    }

    /// Maximum delay between job status queries.
    #[inline]
    pub fn max_poll_delay(&self) -> Duration {
        self.max_poll_delay
    }

    /// Timeout for individual HTTP requests.
    #[inline]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .field("async_mode", &self.async_mode)
            .field("poll_timeout", &self.poll_timeout)
            .field("poll_delay", &self.poll_delay)
            .field("max_poll_delay", &self.max_poll_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Environment variable {} is not set", name),
        )
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::new(
            ErrorKind::InvalidConfig,
            format!("Invalid boolean value for {}: {}", name, other),
        )),
    }
}

fn find_config() -> Option<PathBuf> {
    let current = Path::new("./cloudstack.yaml");
    if current.is_file() {
        match current.canonicalize() {
            Ok(val) => return Some(val),
            Err(e) => warn!("Cannot canonicalize {:?}: {}", current, e),
        }
    }

    if let Some(mut home) = dirs::home_dir() {
        home.push(".config/cloudstack/cloudstack.yaml");
        if home.is_file() {
            return Some(home);
        }
    } else {
        warn!("Cannot find home directory");
    }

    let abs = PathBuf::from("/etc/cloudstack/cloudstack.yaml");
    if abs.is_file() {
        Some(abs)
    } else {
        None
    }
}

#[cfg(test)]
pub mod test {
    use std::fs;
    use std::io::Write;
    use std::time::Duration;

    use super::{parse_bool, Config};
    use crate::ErrorKind;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("https://cloud.example.com/client/api", "key", "secret").unwrap();
        assert_eq!(config.api_url().host_str().unwrap(), "cloud.example.com");
        assert_eq!(config.api_url().path(), "/client/api");
        assert_eq!(config.api_key(), "key");
        assert_eq!(config.secret_key(), "secret");
        assert!(config.verify_ssl());
        assert!(config.async_mode());
        assert_eq!(config.poll_timeout(), Some(Duration::from_secs(300)));
        assert_eq!(config.poll_delay(), Duration::from_secs(1));
        assert_eq!(config.max_poll_delay(), Duration::from_secs(15));
    }

    #[test]
    fn test_config_invalid_url() {
        let err = Config::new("cloud example", "key", "secret").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_config_poll_timeout_forever() {
        let config = Config::new("http://127.0.0.1:8080/client/api", "key", "secret").unwrap();
        assert!(config.clone().with_poll_timeout_secs(0).poll_timeout().is_none());
        assert!(config.clone().with_poll_timeout_secs(-5).poll_timeout().is_none());
        assert_eq!(
            config.with_poll_timeout_secs(30).poll_timeout(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_config_debug_hides_secret() {
        let config = Config::new("http://127.0.0.1/client/api", "key", "very-secret").unwrap();
        let repr = format!("{:?}", config);
        assert!(!repr.contains("very-secret"));
        assert!(repr.contains("<redacted>"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "no").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let path = std::env::temp_dir().join(format!(
            "cloudstack-test-{}.yaml",
            std::process::id()
        ));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(
                file,
                "clouds:\n  lab:\n    api_url: http://10.0.0.1:8080/client/api\n    \
                 api_key: abc\n    secret_key: def\n    verify_ssl: false\n    \
                 async: false\n    timeout: 0\n"
            )
            .unwrap();
        }

        let config = Config::from_file(&path, "lab").unwrap();
        assert_eq!(config.api_url().port(), Some(8080));
        assert_eq!(config.api_key(), "abc");
        assert!(!config.verify_ssl());
        assert!(!config.async_mode());
        assert!(config.poll_timeout().is_none());

        let err = Config::from_file(&path, "missing").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        fs::remove_file(&path).unwrap();
    }
}
