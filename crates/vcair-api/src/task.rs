// Asynchronous task handle
//
// Every configuration submission answers with a `<Task>` document. `Task`
// binds that document to the client that created it so callers can re-read
// its state. Waiting for completion is left to the caller.

use tracing::debug;
use url::Url;

use crate::client::VcaClient;
use crate::error::Error;
use crate::types::{TaskDocument, TaskStatus};

#[derive(Debug, Clone)]
pub struct Task {
    document: TaskDocument,
    client: VcaClient,
}

impl Task {
    pub fn new(client: VcaClient, document: TaskDocument) -> Self {
        Self { document, client }
    }

    /// The task document as last read from the API.
    pub fn document(&self) -> &TaskDocument {
        &self.document
    }

    pub fn into_document(self) -> TaskDocument {
        self.document
    }

    pub fn href(&self) -> &str {
        &self.document.href
    }

    pub fn status(&self) -> TaskStatus {
        self.document.status()
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Re-read the task from its `href`, replacing the held document.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        if self.document.href.is_empty() {
            return Err(Error::MissingHref);
        }
        let url = Url::parse(&self.document.href)?;
        debug!(href = %url, "refreshing task");

        self.document = self.client.get_xml(url).await?;
        Ok(())
    }
}
