use crate::config::Config;
use crate::domain::DeletedFilter;
use crate::services::PlaceFilter;

use super::open_state;

pub async fn cmd_suggest_places(
    config: &Config,
    query: &str,
    limit: Option<u64>,
) -> anyhow::Result<()> {
    let state = open_state(config).await?;

    let filter = PlaceFilter {
        query: Some(query.to_string()),
        mine: false,
        deleted: DeletedFilter::Exclude,
    };
    let labels = state.place_service.suggest(None, filter, limit).await?;

    if labels.is_empty() {
        println!("No suggestions for '{query}'");
        return Ok(());
    }

    for label in labels {
        println!("{label}");
    }

    Ok(())
}
