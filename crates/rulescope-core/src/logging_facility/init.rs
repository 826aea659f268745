//! Subscriber installation

use serde::Deserialize;
use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// How log lines are written
///
/// Selected with `--log-profile` or `log_profile` in the client config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Readable lines, debug and above
    #[default]
    Development,
    /// One JSON object per line, info and above
    Production,
    /// No output; events go to the capture layer when one is installed
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_directives(self) -> &'static str {
        match self {
            Profile::Development => "rulescope=debug,rulescope_core=debug,rulescope_client=debug",
            Profile::Production => "rulescope=info,rulescope_core=info,rulescope_client=info",
            Profile::Test => "off",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile: {}", other)),
        }
    }
}

static INSTALLED: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has an effect. Output goes to stderr, leaving stdout
/// to the rendered outline. A subscriber installed earlier (the test capture
/// layer, for one) is left in place.
pub fn init(profile: Profile) {
    INSTALLED.call_once(|| match profile {
        Profile::Development => {
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Test => {
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
