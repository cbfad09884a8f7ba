//! Database catalog and optimization suggestion endpoints.

use serde_json::json;

use loglens_core::ClientResult;

use crate::client::ApiClient;
use crate::types::{ALL_DATABASES, DatabaseInfo, Suggestion};

impl ApiClient {
    /// Fetch the databases known to the backend.
    ///
    /// # Errors
    ///
    /// Propagates transport and envelope errors; an empty catalog is `Ok`.
    pub async fn databases(&self) -> ClientResult<Vec<DatabaseInfo>> {
        self.fetch_list("/database", &[], &["data"]).await
    }

    /// The filter options to offer in a database selector: the
    /// [`ALL_DATABASES`] sentinel followed by every catalog entry.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`ApiClient::databases`].
    pub async fn database_options(&self) -> ClientResult<Vec<String>> {
        let mut options = vec![ALL_DATABASES.to_string()];
        options.extend(self.databases().await?.into_iter().map(|db| db.database_name));
        Ok(options)
    }

    /// Fetch the open optimization suggestions, optionally per database.
    ///
    /// # Errors
    ///
    /// Propagates transport and envelope errors.
    pub async fn suggestions(&self, database: Option<&str>) -> ClientResult<Vec<Suggestion>> {
        let query: Vec<(String, String)> = match database {
            Some(db) if !db.is_empty() && !db.eq_ignore_ascii_case(ALL_DATABASES) => {
                vec![("database".to_string(), db.to_string())]
            },
            _ => Vec::new(),
        };
        self.fetch_list("/suggestion", &query, &["data", "listSuggestion"])
            .await
    }

    /// Mark a suggestion as handled.
    ///
    /// # Errors
    ///
    /// Propagates transport and envelope errors.
    pub async fn complete_suggestion(&self, id: u64) -> ClientResult<()> {
        self.command("/suggestion/done", &json!({ "id": id })).await?;
        Ok(())
    }
}
