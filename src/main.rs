use leetbot::catalogue::{refresh, CatalogueFetcher, ProblemCache, SnapshotStore};
use leetbot::commands::leetcode;
use leetbot::{config::Config, Data};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    let discord_token = config.discord_token.clone();

    let fetcher = CatalogueFetcher::new(
        config.leetcode_endpoint.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    );
    let store = SnapshotStore::new(config.cache_file.clone());
    let catalogue = Arc::new(ProblemCache::new(fetcher, store));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![leetcode::leetcode(), leetcode::leetcode_refresh()],
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready!");
                match config.dev_guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                    }
                }

                // Set bot status
                ctx.set_activity(Some(serenity::ActivityData::custom(&config.status_message)));

                // Serve persisted data immediately, then keep it fresh daily
                catalogue.initialize().await;
                refresh::spawn_refresh_job(catalogue.clone(), config.refresh_hour_utc);

                Ok(Data { config, catalogue })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    let mut client = serenity::ClientBuilder::new(&discord_token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    info!("Starting bot...");
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    Ok(())
}
