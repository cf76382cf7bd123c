use anyhow::{Result, bail};

use crate::{
    api::{ArtworkId, DeviceId, FrameClient},
    runtime::Runtime,
};

/// Show a random favorite other than the one currently on screen.
#[tracing::instrument(skip(client))]
pub async fn random<R: Runtime>(client: &mut FrameClient<R>, device: Option<DeviceId>) -> Result<()> {
    match client.display_random_favorite(device.as_ref()).await {
        Some(id) => {
            println!("Displayed artwork id {}", id);
            Ok(())
        }
        None => bail!("No artwork displayed"),
    }
}

#[tracing::instrument(skip(client))]
pub async fn display<R: Runtime>(client: &mut FrameClient<R>, artwork: ArtworkId) -> Result<()> {
    if !client.display(&artwork).await {
        bail!("Unable to display artwork {}", artwork);
    }
    println!("Displayed artwork id {}", artwork);
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn favorite<R: Runtime>(client: &mut FrameClient<R>, artwork: ArtworkId) -> Result<()> {
    if !client.favorite(&artwork).await {
        bail!("Unable to favorite artwork {}", artwork);
    }
    println!("Favorited artwork id {}", artwork);
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn unfavorite<R: Runtime>(client: &mut FrameClient<R>, artwork: ArtworkId) -> Result<()> {
    if !client.unfavorite(&artwork).await {
        bail!("Unable to unfavorite artwork {}", artwork);
    }
    println!("Unfavorited artwork id {}", artwork);
    Ok(())
}

/// List favorites, one per line: id, then title and artist when known.
#[tracing::instrument(skip(client))]
pub async fn favorites<R: Runtime>(client: &mut FrameClient<R>) -> Result<()> {
    let favorites = client.favorites().await;
    if favorites.is_empty() {
        println!("No favorites.");
        return Ok(());
    }

    for favorite in favorites {
        let artwork = favorite.artwork;
        let title = artwork.title.as_deref().unwrap_or("(untitled)");
        match artwork.artist_name.as_deref() {
            Some(artist) => println!("{}\t{} by {}", artwork.id, title, artist),
            None => println!("{}\t{}", artwork.id, title),
        }
    }
    Ok(())
}
