//! Summarizer view: pick a document, submit it, show the summary.

use crate::api::ApiClient;
use crate::document::SelectedFile;

#[derive(Debug, Default)]
pub struct SummarizerView {
    file: Option<SelectedFile>,
    loading: bool,
    summary: Option<String>,
}

impl SummarizerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The submit control is inert without a file or while a request
    /// is in flight.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.loading
    }

    /// Send the selected file for summarizing. Failures are logged and
    /// leave any previous summary in place.
    pub async fn submit(&mut self, client: &ApiClient) {
        if !self.can_submit() {
            return;
        }
        let Some(file) = self.file.clone() else {
            return;
        };

        self.loading = true;
        match client.summarize(&file).await {
            Ok(resp) => {
                tracing::info!("Summarized {}", file.name());
                self.summary = Some(resp.summary);
            }
            Err(e) => {
                tracing::error!("Error summarizing {}: {}", file.name(), e);
            }
        }
        self.loading = false;
    }
}
