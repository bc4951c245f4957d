use anyhow::Result;
use colored::Colorize;

use crate::app::AppState;

/// Fetches the model list, then prints the entries matching `query`
/// (or the configured model text when no query is given).
pub async fn list(state: &AppState, query: Option<String>) -> Result<()> {
    let fetched = state.catalog.fetch().await?;
    println!("Fetched {} models.", fetched.len());

    let models = match &query {
        Some(query) => state.catalog.filter(query).await,
        None => state.catalog.live_filter().await,
    };

    if models.is_empty() {
        let shown = query.unwrap_or_else(|| state.config.get().model);
        println!("No models match '{}'.", shown);
        return Ok(());
    }

    let selected = state.config.get().model;
    for model in models {
        if model == selected {
            println!("{} {}", "*".green(), model.green());
        } else {
            println!("  {}", model);
        }
    }
    Ok(())
}
