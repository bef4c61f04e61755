//! Neo4j connection management over the HTTP transactional API.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tenantry_core::control_plane::ControlPlane;
use tenantry_core::error::TenantryResult;
use tenantry_core::statement::Statement;
use tracing::{debug, info};
use url::Url;

use crate::error::DbError;

pub const ENV_URI: &str = "NEO4J_URI";
pub const ENV_USERNAME: &str = "NEO4J_USERNAME";
pub const ENV_PASSWORD: &str = "NEO4J_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "NEO4J_TIMEOUT_SECS";

/// Administrative statements run against this database.
const SYSTEM_DATABASE: &str = "system";
/// Issued once on connect to check reachability and credentials.
const PING_STATEMENT: &str = "SHOW CURRENT USER";

// Bodies of the transactional commit endpoint.

#[derive(Debug, Serialize)]
struct CommitRequest<'a> {
    statements: Vec<StatementPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct StatementPayload<'a> {
    statement: &'a str,
    parameters: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    errors: Vec<ServerError>,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    code: String,
    message: String,
}

/// Configuration for connecting to the Neo4j control plane.
#[derive(Clone)]
pub struct DbConfig {
    /// Connection URI (`http`, `https`, `neo4j`, `neo4j+s`, `bolt`, ...).
    pub uri: String,
    /// Administrative username.
    pub username: String,
    /// Administrative password.
    pub password: String,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            uri: "http://127.0.0.1:7474".into(),
            username: "neo4j".into(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DbConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through `lookup`, reporting every missing
    /// or invalid variable at once.
    ///
    /// Blank values count as missing. The URI is validated here so a bad
    /// scheme fails before any connection attempt.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut problems = Vec::new();

        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                problems.push(format!("{key} is not set"));
                String::new()
            })
        };
        let uri = required(ENV_URI);
        let username = required(ENV_USERNAME);
        let password = required(ENV_PASSWORD);

        let timeout_secs = match get(ENV_TIMEOUT_SECS) {
            None => DbConfig::default().timeout_secs,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    problems.push(format!(
                        "{ENV_TIMEOUT_SECS} must be a positive integer, got `{raw}`"
                    ));
                    0
                }
            },
        };

        if !uri.is_empty() {
            if let Err(err) = http_base_url(&uri) {
                problems.push(err.to_string());
            }
        }

        if !problems.is_empty() {
            return Err(DbError::Config(format!(
                "invalid control-plane configuration: {}",
                problems.join("; ")
            )));
        }

        Ok(Self {
            uri,
            username,
            password,
            timeout_secs,
        })
    }
}

/// Map a connection URI onto the base URL of the HTTP API.
///
/// Bolt-style schemes are translated to their HTTP counterparts; the
/// default Bolt port 7687 becomes 7474 (plain) or 7473 (TLS).
pub(crate) fn http_base_url(uri: &str) -> Result<Url, DbError> {
    let parsed =
        Url::parse(uri).map_err(|e| DbError::Config(format!("{ENV_URI} `{uri}` is invalid: {e}")))?;

    let mut base = match parsed.scheme() {
        "http" | "https" => parsed.clone(),
        scheme => {
            let (http_scheme, http_port) = match scheme {
                "neo4j" | "bolt" => ("http", 7474),
                "neo4j+s" | "bolt+s" | "neo4j+ssc" | "bolt+ssc" => ("https", 7473),
                other => {
                    return Err(DbError::Config(format!(
                        "{ENV_URI} scheme `{other}` is not supported"
                    )));
                }
            };
            let host = parsed
                .host_str()
                .filter(|h| !h.is_empty())
                .ok_or_else(|| DbError::Config(format!("{ENV_URI} `{uri}` has no host")))?;
            let port = match (parsed.port(), http_scheme) {
                (Some(7687), _) | (None, "http") => format!(":{http_port}"),
                (Some(port), _) => format!(":{port}"),
                (None, _) => String::new(),
            };
            Url::parse(&format!("{http_scheme}://{host}{port}/"))
                .map_err(|e| DbError::Config(format!("{ENV_URI} `{uri}` is invalid: {e}")))?
        }
    };

    if base.host_str().is_none_or(str::is_empty) {
        return Err(DbError::Config(format!("{ENV_URI} `{uri}` has no host")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    Ok(base)
}

/// An authenticated session with the Neo4j control plane.
///
/// Acquired once per invocation with [`DbManager::connect`] and released
/// when dropped.
#[derive(Clone)]
pub struct DbManager {
    http: reqwest::Client,
    commit_url: Url,
    username: String,
    password: String,
}

impl DbManager {
    /// Connect to Neo4j using the provided configuration.
    ///
    /// Runs `SHOW CURRENT USER` against the system database so that an
    /// unreachable server or rejected credentials fail here, before any
    /// tenant work starts.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let base = http_base_url(&config.uri)?;
        let commit_url = base
            .join(&format!("db/{SYSTEM_DATABASE}/tx/commit"))
            .map_err(|e| DbError::Config(format!("cannot build commit URL: {e}")))?;

        info!(
            url = %base,
            username = %config.username,
            "Connecting to Neo4j"
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let manager = Self {
            http,
            commit_url,
            username: config.username.clone(),
            password: config.password.clone(),
        };
        manager.run(PING_STATEMENT, Map::new()).await?;

        info!("Successfully connected to Neo4j");

        Ok(manager)
    }

    /// Run one statement in its own auto-committed transaction.
    async fn run(&self, cypher: &str, parameters: Map<String, Value>) -> Result<(), DbError> {
        let body = CommitRequest {
            statements: vec![StatementPayload {
                statement: cypher,
                parameters,
            }],
        };

        let response = self
            .http
            .post(self.commit_url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json;charset=UTF-8")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DbError::Unauthorized(format!(
                "control plane answered {status} for user `{}`",
                self.username
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DbError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: CommitResponse = response
            .json()
            .await
            .map_err(|e| DbError::Decode(e.to_string()))?;

        match payload.errors.into_iter().next() {
            None => Ok(()),
            Some(err) if is_authentication_failure(&err.code) => {
                Err(DbError::Unauthorized(format!("{}: {}", err.code, err.message)))
            }
            Some(err) => Err(DbError::Rejected {
                statement: cypher.to_owned(),
                code: err.code,
                message: err.message,
            }),
        }
    }
}

/// Security errors that mean the session itself is not authenticated.
/// `Security.Forbidden` is a rejected statement, not a login failure.
fn is_authentication_failure(code: &str) -> bool {
    matches!(
        code,
        "Neo.ClientError.Security.Unauthorized"
            | "Neo.ClientError.Security.AuthenticationRateLimit"
            | "Neo.ClientError.Security.CredentialsExpired"
            | "Neo.ClientError.Security.TokenExpired"
    )
}

impl ControlPlane for DbManager {
    async fn execute(&self, statement: &Statement) -> TenantryResult<()> {
        let cypher = statement.cypher();
        debug!(statement = %cypher, "Executing statement");
        self.run(&cypher, statement.parameters())
            .await
            .map_err(Into::into)
    }
}
