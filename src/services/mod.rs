pub mod place_service;
pub use place_service::{PlaceError, PlaceFilter, PlacePage, PlaceService};

pub mod place_service_impl;
pub use place_service_impl::SeaOrmPlaceService;

pub mod search;
pub use search::{SearchError, SearchQuery, SearchService};
