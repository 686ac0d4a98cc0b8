//! `SeaORM` implementation of the `PlaceService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::constants::search::MAX_OFFSET;
use crate::db::Store;
use crate::domain::{Actor, PlaceId};
use crate::models::place::{NewPlace, Place};
use crate::services::place_service::{
    PlaceError, PlaceFilter, PlacePage, PlaceService, resolve_scope, validate_new_place,
};
use crate::services::search::{SearchQuery, SearchService};

pub struct SeaOrmPlaceService {
    store: Store,
    search: Arc<SearchService>,
    page_size: u64,
}

impl SeaOrmPlaceService {
    #[must_use]
    pub const fn new(store: Store, search: Arc<SearchService>, page_size: u64) -> Self {
        Self {
            store,
            search,
            page_size,
        }
    }

    /// Loads a place the caller may manage, whatever its deletion state.
    async fn managed_place(&self, actor: Option<Actor>, id: PlaceId) -> Result<(Actor, Place), PlaceError> {
        let actor = actor.ok_or(PlaceError::Unauthorized)?;
        let place = self
            .store
            .get_place(id)
            .await?
            .ok_or(PlaceError::NotFound(id))?;

        if !actor.can_manage(place.author_id) {
            return Err(PlaceError::Forbidden(format!(
                "Place {id} belongs to another user"
            )));
        }

        Ok((actor, place))
    }
}

/// Row offset of `page`, or a validation error when the page's last row
/// lies past what the drivers can bind.
fn page_offset(page: u64, per_page: u64) -> Result<u64, PlaceError> {
    if page == 0 {
        return Err(PlaceError::Validation("Page must be 1 or greater".to_string()));
    }

    page.checked_mul(per_page)
        .filter(|end| *end <= MAX_OFFSET)
        .map(|end| end - per_page)
        .ok_or_else(|| PlaceError::Validation(format!("Page {page} is out of range")))
}

#[async_trait]
impl PlaceService for SeaOrmPlaceService {
    async fn list(
        &self,
        actor: Option<Actor>,
        filter: PlaceFilter,
        page: u64,
    ) -> Result<PlacePage, PlaceError> {
        let per_page = self.page_size;
        let offset = page_offset(page, per_page)?;
        let scope = resolve_scope(actor.as_ref(), &filter)?;

        let Some(text) = filter.search_text() else {
            let (places, total) = self.store.list_places(scope, page, per_page).await?;
            return Ok(PlacePage {
                places,
                page,
                per_page,
                total: Some(total),
            });
        };

        let query = SearchQuery::new(text, scope.select())
            .limit(per_page)
            .offset(offset);
        let places = self.search.search(query).await?;

        Ok(PlacePage {
            places,
            page,
            per_page,
            total: None,
        })
    }

    async fn suggest(
        &self,
        actor: Option<Actor>,
        filter: PlaceFilter,
        limit: Option<u64>,
    ) -> Result<Vec<String>, PlaceError> {
        let scope = resolve_scope(actor.as_ref(), &filter)?;

        let Some(text) = filter.search_text() else {
            return Ok(Vec::new());
        };

        let query = SearchQuery::new(text, scope.select()).with_limit(limit);
        Ok(self.search.suggest(query).await?)
    }

    async fn get(&self, actor: Option<Actor>, id: PlaceId) -> Result<Place, PlaceError> {
        let place = self
            .store
            .get_place(id)
            .await?
            .ok_or(PlaceError::NotFound(id))?;

        if place.is_deleted() && !actor.is_some_and(|a| a.can_manage(place.author_id)) {
            return Err(PlaceError::NotFound(id));
        }

        Ok(place)
    }

    async fn create(&self, actor: Option<Actor>, place: NewPlace) -> Result<Place, PlaceError> {
        let actor = actor.ok_or(PlaceError::Unauthorized)?;
        let place = place.normalized();
        validate_new_place(&place)?;

        let created = self.store.add_place(actor.user_id, &place).await?;
        info!(
            place_id = %created.id,
            author_id = %actor.user_id,
            "Place created"
        );

        Ok(created)
    }

    async fn delete(&self, actor: Option<Actor>, id: PlaceId) -> Result<(), PlaceError> {
        let (actor, place) = self.managed_place(actor, id).await?;
        if place.is_deleted() || !self.store.soft_delete_place(id).await? {
            return Err(PlaceError::NotFound(id));
        }

        info!(place_id = %id, actor_id = %actor.user_id, "Place deleted");
        Ok(())
    }

    async fn restore(&self, actor: Option<Actor>, id: PlaceId) -> Result<Place, PlaceError> {
        let (actor, place) = self.managed_place(actor, id).await?;
        if !place.is_deleted() {
            return Err(PlaceError::Validation(format!("Place {id} is not deleted")));
        }

        if !self.store.restore_place(id).await? {
            return Err(PlaceError::Validation(format!("Place {id} is not deleted")));
        }
        info!(place_id = %id, actor_id = %actor.user_id, "Place restored");

        self.store
            .get_place(id)
            .await?
            .ok_or(PlaceError::NotFound(id))
    }
}
