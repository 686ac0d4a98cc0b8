use serde::{Deserialize, Serialize};

use crate::domain::{PlaceId, UserId};
use crate::entities::places;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub description: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub author_id: UserId,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl Place {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Address fields joined by single spaces, absent fields rendered empty.
    #[must_use]
    pub fn full_address(&self) -> String {
        [
            &self.address_line,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl From<places::Model> for Place {
    fn from(model: places::Model) -> Self {
        Self {
            id: PlaceId::new(model.id),
            name: model.name,
            description: model.description,
            address_line: model.address_line,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            country: model.country,
            latitude: model.latitude,
            longitude: model.longitude,
            author_id: UserId::new(model.author_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

/// Input for creating a place. The author comes from the caller, not the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlace {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl NewPlace {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn at_address(mut self, address_line: impl Into<String>) -> Self {
        self.address_line = Some(address_line.into());
        self
    }

    #[must_use]
    pub fn in_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Trims every text field and turns blank optional fields into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            description: clean(self.description),
            address_line: clean(self.address_line),
            city: clean(self.city),
            state: clean(self.state),
            postal_code: clean(self.postal_code),
            country: clean(self.country),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Place {
        Place {
            id: PlaceId::new(1),
            name: "Moonhouse".to_string(),
            description: None,
            address_line: Some("1 Acland St".to_string()),
            city: Some("Melbourne".to_string()),
            state: None,
            postal_code: Some("3182".to_string()),
            country: Some("Australia".to_string()),
            latitude: None,
            longitude: None,
            author_id: UserId::new(1),
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000000Z".to_string(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_full_address_keeps_empty_slots() {
        assert_eq!(sample().full_address(), "1 Acland St Melbourne  3182 Australia");
    }

    #[test]
    fn test_normalized_drops_blank_fields() {
        let place = NewPlace {
            name: "  Tokyo Station ".to_string(),
            city: Some("   ".to_string()),
            country: Some(" Japan ".to_string()),
            ..NewPlace::default()
        }
        .normalized();

        assert_eq!(place.name, "Tokyo Station");
        assert_eq!(place.city, None);
        assert_eq!(place.country.as_deref(), Some("Japan"));
    }
}
