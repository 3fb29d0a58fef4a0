//! Startup provisioning: collections and unique indexes.

use mongodb::{
    Collection, Database, IndexModel,
    bson::Document,
    error::{Error, ErrorKind},
    options::IndexOptions,
};
use tracing::{debug, info};

/// Server error code returned when a collection already exists
const NAMESPACE_EXISTS_CODE: i32 = 48;

/// Create the collection `name` unless it already exists.
///
/// Returns `true` when the collection was created by this call.
pub async fn ensure_collection(db: &Database, name: &str) -> Result<bool, Error> {
    let existing = db.list_collection_names().await?;
    if existing.iter().any(|c| c == name) {
        debug!(collection = name, "Collection already present");
        return Ok(false);
    }

    match db.create_collection(name).await {
        Ok(()) => {
            info!(collection = name, "Created collection");
            Ok(true)
        }
        // Another instance won the race
        Err(e) if is_namespace_exists(&e) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Create a unique index over `keys` named `name`. Idempotent.
pub async fn ensure_unique_index(
    collection: &Collection<Document>,
    keys: Document,
    name: &str,
) -> Result<(), Error> {
    let model = IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(name.to_string())
                .build(),
        )
        .build();

    collection.create_index(model).await?;
    info!(
        collection = collection.name(),
        index = name,
        "Unique index ready"
    );
    Ok(())
}

fn is_namespace_exists(err: &Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(e) if e.code == NAMESPACE_EXISTS_CODE)
}
