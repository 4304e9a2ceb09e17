//! [`Config`]-related definitions.

use std::time;

use common::page;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use serde::Deserialize;
use service::infra::cache::Ttl;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Redis configuration.
    pub redis: Redis,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Redis configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Redis {
    /// URL to connect to.
    #[default("redis://127.0.0.1:6379".to_owned())]
    pub url: String,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Expiration times of cached data.
    pub ttl: Ttls,

    /// Maximum number of houses highlighted on the home page.
    #[default(5)]
    pub home_page_houses: usize,

    /// Number of houses on a single search results page.
    #[default(2)]
    pub page_size: u32,

    /// Maximum number of comments shown on a house detail page.
    #[default(30)]
    pub comments_limit: usize,

    /// Public URL prefix of the stored images.
    #[default("http://127.0.0.1:9000/".to_owned())]
    pub image_url_prefix: String,

    /// Time a single database operation is allowed to take.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub store_timeout: time::Duration,

    /// Time a single cache operation is allowed to take.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub cache_timeout: time::Duration,

    /// [JWT] secret viewers are identified with.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("secret".to_owned())]
    pub jwt_secret: String,
}

impl TryFrom<Service> for service::Config {
    type Error = InvalidService;

    fn try_from(value: Service) -> Result<Self, Self::Error> {
        let Service {
            ttl,
            home_page_houses,
            page_size,
            comments_limit,
            image_url_prefix,
            store_timeout,
            cache_timeout,
            jwt_secret: _,
        } = value;

        Ok(Self {
            ttl: ttl.try_into()?,
            home_page_houses,
            page_size: page::Size::new(page_size)
                .ok_or(InvalidService::PageSize)?,
            comments_limit,
            image_url_prefix,
            store_timeout,
            cache_timeout,
        })
    }
}

/// Expiration times of cached data.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Ttls {
    /// Expiration time of the areas list.
    #[default(TWO_HOURS)]
    #[serde(with = "humantime_serde")]
    pub areas: time::Duration,

    /// Expiration time of the home page highlights.
    #[default(TWO_HOURS)]
    #[serde(with = "humantime_serde")]
    pub home_page: time::Duration,

    /// Expiration time of a house detail page.
    #[default(TWO_HOURS)]
    #[serde(with = "humantime_serde")]
    pub house: time::Duration,

    /// Expiration time of a search results bucket.
    #[default(TWO_HOURS)]
    #[serde(with = "humantime_serde")]
    pub search: time::Duration,
}

/// Default expiration time of cached data.
const TWO_HOURS: time::Duration = time::Duration::from_secs(2 * 60 * 60);

impl TryFrom<Ttls> for service::Ttls {
    type Error = InvalidService;

    fn try_from(value: Ttls) -> Result<Self, Self::Error> {
        let Ttls {
            areas,
            home_page,
            house,
            search,
        } = value;

        let ttl = |name, dur| Ttl::new(dur).ok_or(InvalidService::Ttl(name));
        Ok(Self {
            areas: ttl("areas", areas)?,
            home_page: ttl("home_page", home_page)?,
            house: ttl("house", house)?,
            search: ttl("search", search)?,
        })
    }
}

/// Error of converting [`Service`] configuration.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InvalidService {
    /// Expiration time is shorter than a second.
    #[display("`service.ttl.{_0}` must be at least 1s")]
    Ttl(#[error(not(source))] &'static str),

    /// Page size is zero.
    #[display("`service.page_size` must be positive")]
    PageSize,
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use super::{InvalidService, Service, Ttls};

    #[test]
    fn converts_defaults() {
        let conf = service::Config::try_from(Service::default()).unwrap();

        assert_eq!(conf.ttl.search.secs(), 7200);
        assert_eq!(conf.page_size.get(), 2);
        assert_eq!(conf.home_page_houses, 5);
        assert_eq!(conf.comments_limit, 30);
        assert_eq!(conf.store_timeout, time::Duration::from_secs(5));
        assert_eq!(conf.cache_timeout, time::Duration::from_millis(500));
    }

    #[test]
    fn rejects_subsecond_ttl() {
        let conf = Service {
            ttl: Ttls {
                house: time::Duration::from_millis(300),
                ..Ttls::default()
            },
            ..Service::default()
        };

        let err = service::Config::try_from(conf).unwrap_err();

        assert!(matches!(err, InvalidService::Ttl("house")));
    }

    #[test]
    fn rejects_empty_pages() {
        let conf = Service {
            page_size: 0,
            ..Service::default()
        };

        let err = service::Config::try_from(conf).unwrap_err();

        assert!(matches!(err, InvalidService::PageSize));
    }
}
