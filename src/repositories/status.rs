use super::QueryService;
use crate::errors::Result;
use crate::models::Status;
use crate::store::{Collection, DocumentStore, Filter};

impl<S: DocumentStore> QueryService<S> {
    /// The network statistics document; the ingester keeps at most one
    pub async fn status(&self) -> Result<Status> {
        self.find_first(Collection::Status, Filter::All, "Status", "current")
            .await
    }
}
