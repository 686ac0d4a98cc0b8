pub mod prelude;

pub mod places;
