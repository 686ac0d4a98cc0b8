use crate::config::Config;
use crate::services::PlaceError;

use super::{CLI_OPERATOR, open_state, parse_place_id};

pub async fn cmd_restore_place(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = parse_place_id(id_str) else {
        println!("Invalid place ID: {id_str}");
        return Ok(());
    };

    let state = open_state(config).await?;

    match state.place_service.restore(Some(CLI_OPERATOR), id).await {
        Ok(place) => println!("✓ Restored: {} (ID: {})", place.name, place.id),
        Err(PlaceError::NotFound(_)) => println!("Place with ID {id} not found."),
        Err(PlaceError::Validation(msg)) => println!("{msg}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
