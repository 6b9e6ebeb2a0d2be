//! Entity records, their partial-update patches, and table layouts.
//!
//! Each record type is the single definition of its fields: serde derives the wire
//! object and sqlx derives the row mapping from the same struct.

use crate::schema::{float_field, int_field, string_field};
use crate::sql::Table;
use serde::{Deserialize, Serialize};

pub const MOVIE_TABLE: Table = Table {
    name: "movie",
    columns: &[
        "title",
        "description",
        "trailer",
        "year",
        "rating",
        "genre_id",
        "director_id",
    ],
};

pub const DIRECTOR_TABLE: Table = Table {
    name: "director",
    columns: &["name"],
};

pub const GENRE_TABLE: Table = Table {
    name: "genre",
    columns: &["name"],
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovieFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub genre_id: Option<i64>,
    pub director_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: MovieFields,
}

/// Fields supplied in a movie request body. Absent keys stay `None`; explicit nulls are `Some(None)`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MoviePatch {
    #[serde(default, deserialize_with = "string_field")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "string_field")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "string_field")]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "int_field")]
    pub year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "float_field")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "int_field")]
    pub genre_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "int_field")]
    pub director_id: Option<Option<i64>>,
}

impl MoviePatch {
    /// Overwrite only the fields present in the patch.
    pub fn apply(self, fields: &mut MovieFields) {
        if let Some(v) = self.title {
            fields.title = v;
        }
        if let Some(v) = self.description {
            fields.description = v;
        }
        if let Some(v) = self.trailer {
            fields.trailer = v;
        }
        if let Some(v) = self.year {
            fields.year = v;
        }
        if let Some(v) = self.rating {
            fields.rating = v;
        }
        if let Some(v) = self.genre_id {
            fields.genre_id = v;
        }
        if let Some(v) = self.director_id {
            fields.director_id = v;
        }
    }

    pub fn into_fields(self) -> MovieFields {
        let mut fields = MovieFields::default();
        self.apply(&mut fields);
        fields
    }
}

/// Equality filters for listing movies; both set means both must match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub director_id: Option<i64>,
    pub genre_id: Option<i64>,
}

impl MovieFilter {
    pub fn matches(&self, fields: &MovieFields) -> bool {
        self.director_id.map_or(true, |d| fields.director_id == Some(d))
            && self.genre_id.map_or(true, |g| fields.genre_id == Some(g))
    }
}

/// Fields shared by directors and genres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NameFields {
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Director {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: NameFields,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: NameFields,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NamePatch {
    #[serde(default, deserialize_with = "string_field")]
    pub name: Option<Option<String>>,
}

impl NamePatch {
    pub fn apply(self, fields: &mut NameFields) {
        if let Some(v) = self.name {
            fields.name = v;
        }
    }

    pub fn into_fields(self) -> NameFields {
        let mut fields = NameFields::default();
        self.apply(&mut fields);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse;
    use serde_json::json;

    fn inception() -> MovieFields {
        MovieFields {
            title: Some("Inception".into()),
            description: Some("Dreams within dreams".into()),
            trailer: Some("https://example.com/inception".into()),
            year: Some(2010),
            rating: Some(8.8),
            genre_id: Some(2),
            director_id: Some(1),
        }
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut fields = inception();
        let patch: MoviePatch = parse(json!({"title": "New"})).unwrap();
        patch.apply(&mut fields);
        assert_eq!(fields.title.as_deref(), Some("New"));
        assert_eq!(fields, MovieFields { title: Some("New".into()), ..inception() });
    }

    #[test]
    fn explicit_null_clears_a_field() {
        let mut fields = inception();
        let patch: MoviePatch = parse(json!({"director_id": null})).unwrap();
        assert_eq!(patch.director_id, Some(None));
        patch.apply(&mut fields);
        assert_eq!(fields.director_id, None);
        assert_eq!(fields.genre_id, Some(2));
    }

    #[test]
    fn id_and_unknown_keys_are_ignored() {
        let patch: MoviePatch = parse(json!({"id": 42, "budget": 1, "year": "2010"})).unwrap();
        assert_eq!(patch, MoviePatch { year: Some(Some(2010)), ..Default::default() });
    }

    #[test]
    fn bad_coercion_is_rejected() {
        assert!(parse::<MoviePatch>(json!({"year": "soon"})).is_err());
        assert!(parse::<NamePatch>(json!({"name": 3})).is_err());
    }

    #[test]
    fn movie_renders_flat_with_nulls() {
        let movie = Movie {
            id: 3,
            fields: MovieFields { title: Some("Heat".into()), ..Default::default() },
        };
        assert_eq!(
            serde_json::to_value(&movie).unwrap(),
            json!({
                "id": 3,
                "title": "Heat",
                "description": null,
                "trailer": null,
                "year": null,
                "rating": null,
                "genre_id": null,
                "director_id": null
            })
        );
    }

    #[test]
    fn filter_is_conjunctive() {
        let fields = inception();
        assert!(MovieFilter::default().matches(&fields));
        assert!(MovieFilter { director_id: Some(1), genre_id: None }.matches(&fields));
        assert!(MovieFilter { director_id: Some(1), genre_id: Some(2) }.matches(&fields));
        assert!(!MovieFilter { director_id: Some(1), genre_id: Some(3) }.matches(&fields));
    }
}
