use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

use crate::domain::{DeletedFilter, PlaceId, UserId};
use crate::entities::{places, prelude::*};
use crate::models::place::{NewPlace, Place};

/// Timestamps are stored as fixed-width RFC 3339 strings so that ordering the
/// text column is the same as ordering by time.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Base set of places a listing or search runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceScope {
    pub author: Option<UserId>,
    pub deleted: DeletedFilter,
}

impl Default for PlaceScope {
    fn default() -> Self {
        Self::visible()
    }
}

impl PlaceScope {
    #[must_use]
    pub const fn visible() -> Self {
        Self {
            author: None,
            deleted: DeletedFilter::Exclude,
        }
    }

    #[must_use]
    pub const fn owned_by(author: UserId) -> Self {
        Self {
            author: Some(author),
            deleted: DeletedFilter::Exclude,
        }
    }

    #[must_use]
    pub const fn with_deleted(mut self, deleted: DeletedFilter) -> Self {
        self.deleted = deleted;
        self
    }

    /// Builds the unordered query selecting this scope.
    #[must_use]
    pub fn select(&self) -> Select<places::Entity> {
        let mut query = Places::find();

        query = match self.deleted {
            DeletedFilter::Exclude => query.filter(places::Column::DeletedAt.is_null()),
            DeletedFilter::With => query,
            DeletedFilter::Only => query.filter(places::Column::DeletedAt.is_not_null()),
        };

        if let Some(author) = self.author {
            query = query.filter(places::Column::AuthorId.eq(author.value()));
        }

        query
    }
}

pub struct PlaceRepository {
    conn: DatabaseConnection,
}

impl PlaceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        author: UserId,
        place: &NewPlace,
        created_at: DateTime<Utc>,
    ) -> Result<Place> {
        let stamp = format_timestamp(created_at);

        let active_model = places::ActiveModel {
            name: Set(place.name.clone()),
            description: Set(place.description.clone()),
            address_line: Set(place.address_line.clone()),
            city: Set(place.city.clone()),
            state: Set(place.state.clone()),
            postal_code: Set(place.postal_code.clone()),
            country: Set(place.country.clone()),
            latitude: Set(place.latitude),
            longitude: Set(place.longitude),
            author_id: Set(author.value()),
            created_at: Set(stamp.clone()),
            updated_at: Set(stamp),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert place")?;

        Ok(Place::from(model))
    }

    /// Fetches a place regardless of soft-delete state; callers decide visibility.
    pub async fn get(&self, id: PlaceId) -> Result<Option<Place>> {
        let model = Places::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query place by ID")?;

        Ok(model.map(Place::from))
    }

    /// Newest-first page of a scope, `page` counted from 1, plus the scope's total size.
    pub async fn list(&self, scope: PlaceScope, page: u64, per_page: u64) -> Result<(Vec<Place>, u64)> {
        let paginator = scope
            .select()
            .order_by_desc(places::Column::CreatedAt)
            .order_by_desc(places::Column::Id)
            .paginate(&self.conn, per_page);

        let total = paginator
            .num_items()
            .await
            .context("Failed to count places")?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .context("Failed to list places")?;

        Ok((items.into_iter().map(Place::from).collect(), total))
    }

    /// Marks a place deleted. Returns false if it does not exist or is already deleted.
    pub async fn soft_delete(&self, id: PlaceId, at: DateTime<Utc>) -> Result<bool> {
        let stamp = format_timestamp(at);
        let result = Places::update_many()
            .col_expr(places::Column::DeletedAt, stamp.clone().into())
            .col_expr(places::Column::UpdatedAt, stamp.into())
            .filter(places::Column::Id.eq(id.value()))
            .filter(places::Column::DeletedAt.is_null())
            .exec(&self.conn)
            .await
            .context("Failed to soft-delete place")?;

        Ok(result.rows_affected > 0)
    }

    /// Clears the deletion mark. Returns false if the place is not deleted.
    pub async fn restore(&self, id: PlaceId, at: DateTime<Utc>) -> Result<bool> {
        let result = Places::update_many()
            .col_expr(places::Column::DeletedAt, Option::<String>::None.into())
            .col_expr(places::Column::UpdatedAt, format_timestamp(at).into())
            .filter(places::Column::Id.eq(id.value()))
            .filter(places::Column::DeletedAt.is_not_null())
            .exec(&self.conn)
            .await
            .context("Failed to restore place")?;

        Ok(result.rows_affected > 0)
    }
}
