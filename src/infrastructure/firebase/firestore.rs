//! Handle to the project's Cloud Firestore database.

const DEFAULT_DATABASE: &str = "(default)";

/// Database handle created alongside the auth client.
///
/// Deck storage does not exist yet, so this only identifies the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreHandle {
    project_id: String,
    database_id: String,
}

impl FirestoreHandle {
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: DEFAULT_DATABASE.to_string(),
        }
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Resource name of the database, as used by the Firestore REST API.
    #[must_use]
    pub fn database_path(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database_id)
    }
}
