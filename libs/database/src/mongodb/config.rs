#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or};

/// SRV host used when the connection string is assembled from credentials
pub const DEFAULT_SRV_HOST: &str = "cluster0.gfesh.mongodb.net";

/// Database holding the catalog collections
pub const DEFAULT_DATABASE: &str = "productDB";

/// Application name reported to the server
pub const DEFAULT_APP_NAME: &str = "Cluster0";

/// MongoDB connection settings
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "productDB");
///
/// // Or assembled from Atlas credentials
/// let config = MongoConfig::from_credentials("alice", "s3cret", "cluster0.example.net");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string
    /// Format: mongodb[+srv]://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,

    /// Pin the Stable API v1 with strict mode and deprecation errors
    pub stable_api: bool,
}

impl MongoConfig {
    /// Config for `url` using the default database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Config for `url` and a specific database
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Config for an Atlas-style SRV deployment reached with username/password.
    ///
    /// Credentials are percent-encoded so reserved characters survive the URL.
    pub fn from_credentials(username: &str, password: &str, host: &str) -> Self {
        Self::new(srv_url(username, password, host))
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Toggle the Stable API pin
    pub fn with_stable_api(mut self, enabled: bool) -> Self {
        self.stable_api = enabled;
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL with any password replaced, for logs
    pub fn redacted_url(&self) -> String {
        redact_password(&self.url)
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
            stable_api: false,
        }
    }
}

fn srv_url(username: &str, password: &str, host: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
        urlencoding::encode(username),
        urlencoding::encode(password),
        host
    )
}

fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{}://{}:****@{}", scheme, user, host),
        None => url.to_string(),
    }
}

/// Load MongoConfig from environment variables
///
/// Connection string, in order of precedence:
/// - `MONGODB_URL` or `MONGO_URL`
/// - `DB_USERNAME` + `DB_PASSWORD` (+ `MONGODB_HOST`, default
///   `cluster0.gfesh.mongodb.net`) assembled into an SRV URL
///
/// Optional:
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (default: `productDB`)
/// - `MONGODB_APP_NAME` (default: `Cluster0`)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
/// - `MONGODB_STABLE_API` (default: true)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = match env_first(&["MONGODB_URL", "MONGO_URL"]) {
            Some(url) => url,
            None => {
                let username = env_first(&["DB_USERNAME"]).ok_or_else(|| {
                    ConfigError::MissingEnvVar("MONGODB_URL or DB_USERNAME".to_string())
                })?;
                let password = env_first(&["DB_PASSWORD"])
                    .ok_or_else(|| ConfigError::MissingEnvVar("DB_PASSWORD".to_string()))?;
                let host =
                    env_first(&["MONGODB_HOST"]).unwrap_or_else(|| DEFAULT_SRV_HOST.to_string());
                srv_url(&username, &password, &host)
            }
        };

        let database = env_first(&["MONGODB_DATABASE", "MONGO_DATABASE"])
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let app_name =
            env_first(&["MONGODB_APP_NAME"]).unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        Ok(Self {
            url,
            database,
            app_name: Some(app_name),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
            stable_api: env_parse_or("MONGODB_STABLE_API", true)?,
        })
    }
}
