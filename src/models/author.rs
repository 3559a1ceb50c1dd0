//! Author model, derived fields and the author form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{
    collect_errors, escape, parse_iso8601, trimmed, trimmed_optional, FieldError, ALPHANUMERIC,
};

const DISPLAY_DATE: &str = "%b %-d, %Y";

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Validated author fields, used for both creation and full replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

impl Author {
    pub fn from_data(id: Uuid, data: AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    /// "family_name, first_name", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn lifespan(&self) -> String {
        let birth = self
            .date_of_birth
            .map(|d| d.format(DISPLAY_DATE).to_string())
            .unwrap_or_default();
        let death = self
            .date_of_death
            .map(|d| d.format(DISPLAY_DATE).to_string())
            .unwrap_or_else(|| "current".to_string());
        format!("{} - {}", birth, death)
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }
}

/// Author as handed to the views, with derived fields materialized
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub lifespan: String,
    pub url: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        let iso = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            name: author.name(),
            lifespan: author.lifespan(),
            url: author.url(),
            date_of_birth_yyyy_mm_dd: iso(author.date_of_birth),
            date_of_death_yyyy_mm_dd: iso(author.date_of_death),
            author,
        }
    }
}

/// Raw author form as submitted
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
}

/// Sanitized author form; also what the form view re-displays
#[derive(Debug, Clone, Serialize, Validate, ToSchema)]
pub struct AuthorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(
        length(min = 1, message = "First name must be specified."),
        regex(
            path = *ALPHANUMERIC,
            message = "First name has non-alphanumeric characters."
        ),
        custom(
            function = crate::validation::validate_name_length,
            message = "First name must be at most 100 characters."
        )
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        regex(
            path = *ALPHANUMERIC,
            message = "Family name has non-alphanumeric characters."
        ),
        custom(
            function = crate::validation::validate_name_length,
            message = "Family name must be at most 100 characters."
        )
    )]
    pub family_name: String,
    #[validate(custom(
        function = crate::validation::validate_iso8601,
        message = "Invalid date of birth"
    ))]
    pub date_of_birth: Option<String>,
    #[validate(custom(
        function = crate::validation::validate_iso8601,
        message = "Invalid date of death"
    ))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    /// Trim and escape the text fields; blank dates count as not submitted
    pub fn sanitize(&self) -> AuthorInput {
        AuthorInput {
            id: None,
            first_name: escape(&trimmed(self.first_name.as_deref())),
            family_name: escape(&trimmed(self.family_name.as_deref())),
            date_of_birth: trimmed_optional(self.date_of_birth.as_deref()),
            date_of_death: trimmed_optional(self.date_of_death.as_deref()),
        }
    }
}

impl AuthorInput {
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Run the author rules, yielding either storable data or the failures
    pub fn check(&self) -> Result<AuthorData, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(collect_errors(
                &errors,
                &[
                    ("first_name", self.first_name.as_str()),
                    ("family_name", self.family_name.as_str()),
                    ("date_of_birth", self.date_of_birth.as_deref().unwrap_or_default()),
                    ("date_of_death", self.date_of_death.as_deref().unwrap_or_default()),
                ],
            ));
        }

        Ok(AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth.as_deref().and_then(parse_iso8601),
            date_of_death: self.date_of_death.as_deref().and_then(parse_iso8601),
        })
    }
}
