use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{Order, QueryFilter, QueryOrder, Select};
use std::fmt;

use super::predicate::MatchFields;
use crate::entities::places;

/// How matched places are filtered and ordered for one kind of store.
///
/// Both implementations gate inclusion with the same substring predicate;
/// they differ only in ordering.
pub trait SearchStrategy: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn fields(&self) -> &MatchFields;

    /// Orders rows that already passed the match predicate.
    fn order(&self, select: Select<places::Entity>, text: &str) -> Select<places::Entity>;

    fn apply(&self, select: Select<places::Entity>, text: &str) -> Select<places::Entity> {
        let filtered = select.filter(self.fields().predicate(text));
        self.order(filtered, text)
    }
}

/// Newest first. Used on stores without similarity scoring.
#[derive(Debug, Clone, Copy)]
pub struct PlainOrderedStrategy {
    fields: MatchFields,
}

impl PlainOrderedStrategy {
    #[must_use]
    pub const fn new(fields: MatchFields) -> Self {
        Self { fields }
    }
}

impl SearchStrategy for PlainOrderedStrategy {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn fields(&self) -> &MatchFields {
        &self.fields
    }

    fn order(&self, select: Select<places::Entity>, _text: &str) -> Select<places::Entity> {
        select
            .order_by_desc(places::Column::CreatedAt)
            .order_by_desc(places::Column::Id)
    }
}

/// Best trigram similarity across the searchable fields first, newest first
/// among equal scores. Requires PostgreSQL with `pg_trgm`.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyRankedStrategy {
    fields: MatchFields,
}

impl FuzzyRankedStrategy {
    #[must_use]
    pub const fn new(fields: MatchFields) -> Self {
        Self { fields }
    }

    /// `GREATEST(similarity(field, text), ...)` over name, city, description and address.
    #[must_use]
    pub fn score_expr(&self, text: &str) -> SimpleExpr {
        let scores = self.fields.text_exprs().into_iter().map(|field| -> SimpleExpr {
            Func::cust(Alias::new("similarity"))
                .arg(field)
                .arg(Expr::val(text))
                .into()
        });

        Func::greatest(scores).into()
    }
}

impl SearchStrategy for FuzzyRankedStrategy {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn fields(&self) -> &MatchFields {
        &self.fields
    }

    fn order(&self, select: Select<places::Entity>, text: &str) -> Select<places::Entity> {
        select
            .order_by(self.score_expr(text), Order::Desc)
            .order_by_desc(places::Column::CreatedAt)
            .order_by_desc(places::Column::Id)
    }
}
