use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub dev_guild_id: Option<u64>,
    pub status_message: String,
    pub leetcode_endpoint: String,
    pub cache_file: String,
    pub fetch_timeout_secs: u64,
    pub refresh_hour_utc: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        let refresh_hour_utc: u32 = env::var("REFRESH_HOUR_UTC")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .unwrap_or(2);
        if refresh_hour_utc > 23 {
            anyhow::bail!("REFRESH_HOUR_UTC must be between 0 and 23");
        }

        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN must be set"))?,
            dev_guild_id: env::var("DEV_GUILD_ID").ok().and_then(|id| id.parse().ok()),
            status_message: env::var("STATUS_MESSAGE")
                .unwrap_or_else(|_| "Grinding LeetCode".to_string()),
            leetcode_endpoint: env::var("LEETCODE_ENDPOINT")
                .unwrap_or_else(|_| "https://leetcode.com/graphql/".to_string()),
            cache_file: env::var("CACHE_FILE").unwrap_or_else(|_| "data/leetcode.json".to_string()),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            refresh_hour_utc,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"[REDACTED]")
            .field("dev_guild_id", &self.dev_guild_id)
            .field("status_message", &self.status_message)
            .field("leetcode_endpoint", &self.leetcode_endpoint)
            .field("cache_file", &self.cache_file)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("refresh_hour_utc", &self.refresh_hour_utc)
            .finish()
    }
}
