use crate::config::Config;
use crate::domain::Actor;
use crate::models::place::NewPlace;

use super::open_state;

pub struct AddPlaceArgs {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub user: i32,
}

pub async fn cmd_add_place(config: &Config, args: AddPlaceArgs) -> anyhow::Result<()> {
    let state = open_state(config).await?;

    let place = NewPlace {
        name: args.name,
        description: args.description,
        address_line: args.address,
        city: args.city,
        state: args.state,
        postal_code: args.postal_code,
        country: args.country,
        ..NewPlace::default()
    };

    let created = state
        .place_service
        .create(Some(Actor::member(args.user)), place)
        .await?;

    println!("✓ Added: {} (ID: {})", created.name, created.id);
    Ok(())
}
