use axum_helpers::JsonDocument;
use database::mongodb::json_to_document;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{UserError, UserResult};

pub const COLLECTION: &str = "users";

/// A registered user; only `email` is interpreted, the rest is profile data.
pub type User = JsonDocument;

/// Body of `POST /users`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct NewUser(pub Map<String, Value>);

impl NewUser {
    /// The email the user registers under, if present and a non-empty string
    pub fn email(&self) -> Option<&str> {
        self.0
            .get("email")
            .and_then(Value::as_str)
            .filter(|email| !email.is_empty())
    }

    /// Validate and convert into the document to insert.
    ///
    /// Returns the email alongside so a duplicate can be reported.
    pub fn into_document(self) -> UserResult<(String, Document)> {
        let email = self
            .email()
            .ok_or_else(|| {
                UserError::Validation(
                    "Field 'email' is required and must be a non-empty string".to_string(),
                )
            })?
            .to_string();

        let mut document = json_to_document(self.0);
        document.remove("_id");
        Ok((email, document))
    }
}

/// Body of `PATCH /users/{email}`: fields to `$set`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UserChanges(pub Map<String, Value>);

impl UserChanges {
    pub fn into_document(self) -> Option<Document> {
        let mut document = json_to_document(self.0);
        document.remove("_id");
        (!document.is_empty()).then_some(document)
    }
}
