use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::ModelError;
use crate::number::{parse_number, required};

/// A user review; ids are only unique within the owning business.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: u64,
    pub username: String,
    pub comment: String,
    pub stars: Number,
}

impl Review {
    pub fn new(id: u64, fields: ReviewFields) -> Self {
        Self {
            id,
            username: fields.username,
            comment: fields.comment,
            stars: fields.stars,
        }
    }

    pub fn apply(&mut self, fields: ReviewFields) {
        self.username = fields.username;
        self.comment = fields.comment;
        self.stars = fields.stars;
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewForm {
    pub username: Option<String>,
    pub comment: Option<String>,
    pub stars: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewFields {
    pub username: String,
    pub comment: String,
    pub stars: Number,
}

impl ReviewForm {
    pub fn validate(self) -> Result<ReviewFields, ModelError> {
        let username = required("username", self.username)?;
        let comment = required("comment", self.comment)?;
        let stars = parse_number("stars", &required("stars", self.stars)?)?;
        Ok(ReviewFields { username, comment, stars })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::{sample_directory, Business};
    use serde_json::json;

    fn alice() -> ReviewFields {
        ReviewForm {
            username: Some("alice".into()),
            comment: Some("Great!".into()),
            stars: Some("5".into()),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn missing_stars_rejected() {
        let form = ReviewForm { username: Some("a".into()), comment: Some("b".into()), stars: None };
        assert_eq!(form.validate(), Err(ModelError::MissingField("stars")));
    }

    #[test]
    fn non_numeric_stars_rejected() {
        let form = ReviewForm { username: Some("a".into()), comment: Some("b".into()), stars: Some("lots".into()) };
        assert!(matches!(form.validate(), Err(ModelError::InvalidNumber { field: "stars", .. })));
    }

    #[test]
    fn review_ids_start_at_one_and_track_max() {
        let mut b: Business = sample_directory().remove(0);
        assert_eq!(b.next_review_id(), Some(1));
        b.reviews.push(Review::new(1, alice()));
        b.reviews.push(Review::new(2, alice()));
        assert_eq!(b.next_review_id(), Some(3));
        b.reviews.retain(|r| r.id != 1);
        assert_eq!(b.next_review_id(), Some(3));
    }

    #[test]
    fn apply_keeps_id() {
        let mut r = Review::new(7, alice());
        r.apply(ReviewFields { username: "bob".into(), comment: "meh".into(), stars: Number::from(2) });
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"id": 7, "username": "bob", "comment": "meh", "stars": 2})
        );
    }
}
