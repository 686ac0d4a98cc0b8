pub use super::places::Entity as Places;
