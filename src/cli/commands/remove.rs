use crate::config::Config;
use crate::services::PlaceError;

use super::{CLI_OPERATOR, open_state, parse_place_id};

pub async fn cmd_remove_place(config: &Config, id_str: &str, yes: bool) -> anyhow::Result<()> {
    let Some(id) = parse_place_id(id_str) else {
        println!("Invalid place ID: {id_str}");
        println!("Use 'placeshare search <text>' to find place IDs.");
        return Ok(());
    };

    let state = open_state(config).await?;

    let place = match state.place_service.get(Some(CLI_OPERATOR), id).await {
        Ok(place) if !place.is_deleted() => place,
        Ok(_) | Err(PlaceError::NotFound(_)) => {
            println!("Place with ID {id} not found.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !yes {
        println!("Remove '{}' (ID: {})?", place.name, place.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    state.place_service.delete(Some(CLI_OPERATOR), id).await?;
    println!("✓ Removed: {}", place.name);
    println!("Undo with: placeshare restore {id}");

    Ok(())
}
