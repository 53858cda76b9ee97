use clap::Parser;

pub const TOKEN_ENV: &str = "ROBOTEVENTS_TOKEN";
pub const BASE_URL_ENV: &str = "ROBOTEVENTS_API_URL";
pub const DIVISION_ENV: &str = "ROBOTEVENTS_DIVISION";
pub const TIMEOUT_ENV: &str = "ROBOTEVENTS_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://www.robotevents.com/api/v2";
const DEFAULT_DIVISION: u32 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// List qualification-match upsets for a RobotEvents event
#[derive(Parser, Debug, Clone)]
#[command(
    name = "robotevents-upsets",
    version,
    about,
    after_help = "Environment:\n  \
        ROBOTEVENTS_TOKEN         RobotEvents API bearer token\n  \
        ROBOTEVENTS_API_URL       API base URL [default: https://www.robotevents.com/api/v2]\n  \
        ROBOTEVENTS_DIVISION      Division to analyse [default: 1]\n  \
        ROBOTEVENTS_TIMEOUT_SECS  HTTP request timeout in seconds [default: 30]"
)]
pub struct Cli {
    /// Event SKU, e.g. RE-VRC-23-1234
    pub sku: String,
}

/// Runtime settings: the SKU from the command line, everything else from
/// the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub sku: String,
    pub token: Option<String>,
    pub base_url: String,
    pub division: u32,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env(cli: Cli) -> anyhow::Result<Self> {
        Self::from_lookup(cli, |key| std::env::var(key).ok())
    }

    /// Build settings using `lookup` to read environment values. Empty values
    /// count as unset.
    pub fn from_lookup<F>(cli: Cli, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let division = match get(DIVISION_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", DIVISION_ENV, raw, e))?,
            None => DEFAULT_DIVISION,
        };
        let timeout_secs = match get(TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", TIMEOUT_ENV, raw, e))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            sku: cli.sku,
            token: get(TOKEN_ENV),
            base_url: get(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            division,
            timeout_secs,
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sku.trim().is_empty() {
            anyhow::bail!("event SKU must not be empty");
        }
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("invalid base_url '{}': {}", self.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("base_url must use http or https, got '{}'", url.scheme());
        }
        if self.division == 0 {
            anyhow::bail!("division must be 1 or greater");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be positive");
        }
        Ok(())
    }
}
