use anyhow::{Context, Result};

use crate::api::ApiClient;

pub async fn run(client: &ApiClient, name: &str) -> Result<()> {
    let resp = client
        .health(name)
        .await
        .with_context(|| format!("Health check against {} failed", client.base_url()))?;
    println!("{}", resp.detail);
    Ok(())
}
