use crate::config::Config;
use crate::constants::search::MAX_PAGE_SIZE;
use crate::db::PlaceScope;
use crate::domain::DeletedFilter;
use crate::services::SearchQuery;

use super::open_state;

pub async fn cmd_search_places(
    config: &Config,
    query: &str,
    limit: Option<u64>,
    include_deleted: bool,
) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let state = open_state(config).await?;
    let scope = if include_deleted {
        PlaceScope::visible().with_deleted(DeletedFilter::With)
    } else {
        PlaceScope::visible()
    };

    let results = state
        .search_service
        .search(
            SearchQuery::new(query, scope.select())
                .with_limit(limit.map(|l| l.clamp(1, MAX_PAGE_SIZE))),
        )
        .await?;

    if results.is_empty() {
        println!("No places found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results ({}):", state.search_service.strategy_name());
    println!("{:-<60}", "");

    for place in &results {
        let marker = if place.is_deleted() { " [deleted]" } else { "" };
        println!("• {} (ID: {}){marker}", place.name, place.id);

        let address = place.full_address();
        let address = address.split_whitespace().collect::<Vec<_>>().join(" ");
        if !address.is_empty() {
            println!("  {address}");
        }
        println!("  Added: {} by user {}", place.created_at, place.author_id);
        println!();
    }

    Ok(())
}
