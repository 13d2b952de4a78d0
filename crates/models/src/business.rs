use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::ModelError;
use crate::number::{parse_number, required};
use crate::review::Review;

/// A directory entry. Reviews are kept in insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub id: u64,
    pub name: String,
    pub town: String,
    pub rating: Number,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Business {
    pub fn new(id: u64, fields: BusinessFields) -> Self {
        Self {
            id,
            name: fields.name,
            town: fields.town,
            rating: fields.rating,
            reviews: Vec::new(),
        }
    }

    /// Overwrite the editable fields; id and reviews are untouched.
    pub fn apply(&mut self, fields: BusinessFields) {
        self.name = fields.name;
        self.town = fields.town;
        self.rating = fields.rating;
    }

    pub fn review(&self, review_id: u64) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }

    pub fn review_mut(&mut self, review_id: u64) -> Option<&mut Review> {
        self.reviews.iter_mut().find(|r| r.id == review_id)
    }

    /// `1` for the first review, then one past the highest id in use.
    /// `None` once the highest id is `u64::MAX`.
    pub fn next_review_id(&self) -> Option<u64> {
        self.reviews.iter().map(|r| r.id).max().map_or(Some(1), |max| max.checked_add(1))
    }
}

/// Raw form submission for create/update. Every field is optional here so an
/// absent key surfaces as a validation error instead of an extractor rejection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BusinessForm {
    pub name: Option<String>,
    pub town: Option<String>,
    pub rating: Option<String>,
}

/// Validated business fields.
#[derive(Clone, Debug, PartialEq)]
pub struct BusinessFields {
    pub name: String,
    pub town: String,
    pub rating: Number,
}

impl BusinessForm {
    pub fn validate(self) -> Result<BusinessFields, ModelError> {
        let name = required("name", self.name)?;
        let town = required("town", self.town)?;
        let rating = parse_number("rating", &required("rating", self.rating)?)?;
        Ok(BusinessFields { name, town, rating })
    }
}

/// Next business id: one past the highest id, or `1` for an empty directory.
/// `None` once the highest id is `u64::MAX`.
pub fn next_business_id(businesses: &[Business]) -> Option<u64> {
    businesses.iter().map(|b| b.id).max().map_or(Some(1), |max| max.checked_add(1))
}

/// The directory a fresh server starts with.
pub fn sample_directory() -> Vec<Business> {
    [
        (1, "Spice Route Kerala", "Kochi", 5),
        (2, "Punjab Tandoori House", "Lahore", 4),
        (3, "Dhaka Street Biryani", "Dhaka", 4),
        (4, "Kathmandu Momo Corner", "Kathmandu", 5),
    ]
    .into_iter()
    .map(|(id, name, town, rating)| Business {
        id,
        name: name.to_string(),
        town: town.to_string(),
        rating: Number::from(rating),
        reviews: Vec::new(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(name: Option<&str>, town: Option<&str>, rating: Option<&str>) -> BusinessForm {
        BusinessForm {
            name: name.map(Into::into),
            town: town.map(Into::into),
            rating: rating.map(Into::into),
        }
    }

    #[test]
    fn complete_form_validates() {
        let fields = form(Some("Test Cafe"), Some("Goa"), Some("4")).validate().unwrap();
        assert_eq!(fields.name, "Test Cafe");
        assert_eq!(fields.rating, Number::from(4));
    }

    #[test]
    fn each_missing_field_is_reported() {
        assert_eq!(form(None, Some("Goa"), Some("4")).validate(), Err(ModelError::MissingField("name")));
        assert_eq!(form(Some("x"), None, Some("4")).validate(), Err(ModelError::MissingField("town")));
        assert_eq!(form(Some("x"), Some("Goa"), None).validate(), Err(ModelError::MissingField("rating")));
    }

    #[test]
    fn empty_text_is_allowed() {
        let fields = form(Some(""), Some(""), Some("0")).validate().unwrap();
        assert!(fields.name.is_empty());
    }

    #[test]
    fn json_shape_matches_wire_format() {
        let b = Business::new(5, form(Some("Test Cafe"), Some("Goa"), Some("4")).validate().unwrap());
        assert_eq!(
            serde_json::to_value(&b).unwrap(),
            json!({"id": 5, "name": "Test Cafe", "town": "Goa", "rating": 4, "reviews": []})
        );
    }

    #[test]
    fn next_id_follows_current_max() {
        let mut dir = sample_directory();
        assert_eq!(next_business_id(&dir), Some(5));
        dir.retain(|b| b.id != 4);
        assert_eq!(next_business_id(&dir), Some(4));
        assert_eq!(next_business_id(&[]), Some(1));
    }

    #[test]
    fn id_space_runs_out_at_max() {
        let mut dir = sample_directory();
        dir[3].id = u64::MAX;
        assert_eq!(next_business_id(&dir), None);

        let mut b = dir.remove(0);
        b.reviews.push(crate::Review {
            id: u64::MAX,
            username: "a".into(),
            comment: "b".into(),
            stars: Number::from(1),
        });
        assert_eq!(b.next_review_id(), None);
    }

    #[test]
    fn sample_directory_has_four_entries() {
        let dir = sample_directory();
        assert_eq!(dir.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(dir.iter().all(|b| b.reviews.is_empty()));
    }
}
