use anyhow::{Context, Result, bail};

use crate::{api::FrameClient, runtime::Runtime};

/// Print the account's user document as pretty JSON.
#[tracing::instrument(skip(client))]
pub async fn user<R: Runtime>(client: &mut FrameClient<R>) -> Result<()> {
    let Some(user) = client.user().await else {
        bail!("Unable to fetch user information");
    };
    let pretty = serde_json::to_string_pretty(&user).context("Failed to format user information")?;
    println!("{}", pretty);
    Ok(())
}
