//! Application configuration loaded from environment variables.

use std::{env, net::IpAddr, path::PathBuf, str::FromStr};

use tracing::level_filters::LevelFilter;

#[derive(Debug, thiserror::Error)]
#[error("invalid value {value:?} for {name}")]
pub struct ConfigError {
	name: &'static str,
	value: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
	pub host: IpAddr,
	pub port: u16,
	/// The JSON file holding every post.
	pub posts_file: PathBuf,
	/// Whether titles and contents are HTML-escaped before they are stored.
	/// Rendering always escapes, so enabling this escapes text twice.
	pub sanitize_on_write: bool,
	pub log_level: LevelFilter,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: IpAddr::from([127, 0, 0, 1]),
			port: 3000,
			posts_file: PathBuf::from("posts.json"),
			sanitize_on_write: false,
			log_level: LevelFilter::INFO,
		}
	}
}

/// Reads and parses a variable, falling back to `default` when it is unset.
fn var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
	match env::var(name) {
		Ok(value) => value.trim().parse().map_err(|_| ConfigError { name, value }),
		Err(_) => Ok(default),
	}
}

impl Config {
	/// Loads configuration from the environment, reading `.env` first if it exists.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenvy::dotenv().ok();

		let defaults = Self::default();

		Ok(Self {
			host: var("HOST", defaults.host)?,
			port: var("PORT", defaults.port)?,
			posts_file: var("POSTS_FILE", defaults.posts_file)?,
			sanitize_on_write: var("SANITIZE_ON_WRITE", defaults.sanitize_on_write)?,
			log_level: var("LOG_LEVEL", defaults.log_level)?,
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_var_default_and_parse() {
		assert_eq!(var("MINI_BLOG_TEST_UNSET", 7u16).unwrap(), 7);

		env::set_var("MINI_BLOG_TEST_PORT", " 8080 ");
		assert_eq!(var("MINI_BLOG_TEST_PORT", 3000u16).unwrap(), 8080);

		env::set_var("MINI_BLOG_TEST_FLAG", "yes");
		let error = var("MINI_BLOG_TEST_FLAG", false).unwrap_err();
		assert_eq!(
			error.to_string(),
			"invalid value \"yes\" for MINI_BLOG_TEST_FLAG"
		);
	}

	#[test]
	fn test_log_level_parses() {
		env::set_var("MINI_BLOG_TEST_LEVEL", "debug");
		assert_eq!(
			var("MINI_BLOG_TEST_LEVEL", LevelFilter::INFO).unwrap(),
			LevelFilter::DEBUG
		);
	}
}
