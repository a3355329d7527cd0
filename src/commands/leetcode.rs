use crate::catalogue::{Difficulty, Problem, ProblemFilter};
use crate::{Context, Error};
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};
use tracing::warn;

/// Get a random LeetCode problem
#[poise::command(slash_command)]
pub async fn leetcode(
    ctx: Context<'_>,
    #[description = "Difficulty level"] difficulty: Option<Difficulty>,
    #[description = "Problem category"]
    #[autocomplete = "autocomplete_category"]
    category: Option<String>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let catalogue = &ctx.data().catalogue;

    // Empty cache: try one on-demand refresh before giving up
    if catalogue.size() == 0 {
        if let Err(e) = catalogue.force_refresh().await {
            warn!("on-demand catalogue refresh failed: {e}");
            ctx.say("❌ The problem list is unavailable right now. Try again later.")
                .await?;
            return Ok(());
        }
    }

    let filter = ProblemFilter {
        difficulty,
        category,
    };

    match catalogue.random_problem(&filter) {
        Some(problem) => {
            ctx.send(poise::CreateReply::default().embed(problem_embed(&problem)))
                .await?;
        }
        None => {
            ctx.say("🤷 No problems match your filter.").await?;
        }
    }

    Ok(())
}

/// Re-download the problem list from LeetCode
#[poise::command(slash_command, owners_only)]
pub async fn leetcode_refresh(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    match ctx.data().catalogue.force_refresh().await {
        Ok(count) => {
            ctx.say(format!("✅ Refreshed the catalogue: {} problems cached.", count))
                .await?;
        }
        Err(e) => {
            ctx.say(format!("❌ Refresh failed: {}. Previous data is still served.", e))
                .await?;
        }
    }

    Ok(())
}

async fn autocomplete_category(ctx: Context<'_>, partial: &str) -> impl Iterator<Item = String> {
    ctx.data()
        .catalogue
        .search_categories(partial)
        .into_iter()
}

fn problem_embed(problem: &Problem) -> CreateEmbed {
    let topics = if problem.tags.is_empty() {
        "None".to_string()
    } else {
        problem.tags.join(", ")
    };

    CreateEmbed::new()
        .title(format!("{}. {}", problem.frontend_id, problem.title))
        .url(problem.url())
        .color(problem.difficulty.color())
        .field("Difficulty", problem.difficulty.to_string(), true)
        .field(
            "Acceptance Rate",
            format!("{:.2}%", problem.acceptance_rate),
            true,
        )
        .field("Topics", topics, false)
        .footer(CreateEmbedFooter::new("Powered by LeetCode"))
}
