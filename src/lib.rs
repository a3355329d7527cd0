pub mod catalogue;
pub mod commands;
pub mod config;

/// Custom data passed to all commands
pub struct Data {
    pub config: config::Config,
    pub catalogue: std::sync::Arc<catalogue::ProblemCache>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
