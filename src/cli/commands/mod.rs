mod add;
mod remove;
mod restore;
mod search;
mod suggest;

pub use add::{AddPlaceArgs, cmd_add_place};
pub use remove::cmd_remove_place;
pub use restore::cmd_restore_place;
pub use search::cmd_search_places;
pub use suggest::cmd_suggest_places;

use crate::config::Config;
use crate::domain::{Actor, PlaceId};
use crate::state::SharedState;

/// Local CLI access acts as an administrator.
const CLI_OPERATOR: Actor = Actor::admin(1);

async fn open_state(config: &Config) -> anyhow::Result<SharedState> {
    SharedState::new(config.clone()).await
}

fn parse_place_id(id_str: &str) -> Option<PlaceId> {
    id_str
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .map(PlaceId::new)
}
