use std::path::Path;

use anyhow::Result;

use crate::api::ApiClient;
use crate::document;
use crate::summarize::SummarizerView;

pub async fn run(client: &ApiClient, path: &Path) -> Result<()> {
    let mut view = SummarizerView::new();
    view.select_file(document::pick(path).await?);

    println!("Summarizing {}...", path.display());
    view.submit(client).await;

    match view.summary() {
        Some(summary) => println!("{}", summary),
        None => println!("No summary available."),
    }

    Ok(())
}
