//! Picture frame API client.

use log::{debug, info, warn};
use reqwest::Response;
use serde_json::Value;

use super::Endpoint;
use super::selection::choose_random_item;
use super::types::{ArtworkId, Device, DeviceId, Favorite, LenientList};
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::http::{ApiRequest, SessionClient};
use crate::runtime::Runtime;

/// High-level operations on the user's account and frames.
///
/// Like the pipeline underneath, nothing here returns an error: failures are
/// logged and come back as `None`, `false` or an empty list.
pub struct FrameClient<R: Runtime> {
    pub(super) http: SessionClient<R>,
}

impl<R: Runtime> FrameClient<R> {
    pub fn new(runtime: R, config: ClientConfig, credentials: Credentials) -> Self {
        Self {
            http: SessionClient::new(runtime, config, credentials),
        }
    }

    pub fn session(&self) -> &SessionClient<R> {
        &self.http
    }

    /// The user-info document.
    #[tracing::instrument(skip(self))]
    pub async fn user(&mut self) -> Option<Value> {
        let user: Value = self
            .http
            .request_json(&ApiRequest::get(Endpoint::User.path()))
            .await;
        (!user.is_null()).then_some(user)
    }

    #[tracing::instrument(skip(self))]
    pub async fn devices(&mut self) -> Vec<Device> {
        let devices: LenientList<Device> = self
            .http
            .request_json(&ApiRequest::get(Endpoint::Devices.path()))
            .await;
        devices.items
    }

    /// All favorites, page by page, up to the configured maximum.
    #[tracing::instrument(skip(self))]
    pub async fn favorites(&mut self) -> Vec<Favorite> {
        let page_size = self.http.config().favorites_page_size.max(1);
        let max = self.http.config().max_favorites;

        let mut favorites = Vec::new();
        let mut offset = 0;

        while favorites.len() < max {
            let request = ApiRequest::get(Endpoint::Favorited.path())
                .param("limit", page_size)
                .param("offset", offset);

            debug!("Fetching favorites at offset {}...", offset);
            let page: LenientList<Favorite> = self.http.request_json(&request).await;
            let page_len = page.received();
            if page_len == 0 {
                break;
            }

            favorites.extend(page.items);

            if page_len < page_size {
                break;
            }
            offset += page_size;
        }

        favorites.truncate(max);
        favorites
    }

    #[tracing::instrument(skip(self))]
    pub async fn favorite(&mut self, artwork: &ArtworkId) -> bool {
        let request = ApiRequest::put(Endpoint::Favorited.path()).append_path(artwork.as_str());
        succeeded(self.http.request(&request).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn unfavorite(&mut self, artwork: &ArtworkId) -> bool {
        let request =
            ApiRequest::delete(Endpoint::Favorited.path()).append_path(artwork.as_str());
        succeeded(self.http.request(&request).await)
    }

    /// Put an artwork on screen.
    #[tracing::instrument(skip(self))]
    pub async fn display(&mut self, artwork: &ArtworkId) -> bool {
        let request = ApiRequest::put(Endpoint::Displayed.path()).append_path(artwork.as_str());
        succeeded(self.http.request(&request).await)
    }

    /// Display a random favorite other than the one on screen.
    ///
    /// Works on `device`, or the first device of the account when `None`.
    /// Returns the id of the displayed artwork.
    #[tracing::instrument(skip(self))]
    pub async fn display_random_favorite(&mut self, device: Option<&DeviceId>) -> Option<ArtworkId> {
        let devices = self.devices().await;
        let target = match device {
            Some(id) => devices.iter().find(|d| &d.id == id),
            None => devices.first(),
        };
        let Some(target) = target else {
            warn!("No matching device returned");
            return None;
        };
        let current = target.current_artwork().cloned();
        debug!("Device {} currently shows {:?}", target.id, current);

        let favorites = self.favorites().await;
        if favorites.is_empty() {
            warn!("No favorites to display");
            return None;
        }

        let chosen = {
            let mut rng = rand::thread_rng();
            choose_random_item(&favorites, current.as_ref(), &mut rng)?
                .artwork
                .id
                .clone()
        };

        if self.display(&chosen).await {
            info!("Displayed artwork {}", chosen);
            Some(chosen)
        } else {
            warn!("Unable to display artwork {}", chosen);
            None
        }
    }
}

pub(super) fn succeeded(response: Option<Response>) -> bool {
    match response {
        Some(response) if response.status().is_success() => true,
        Some(response) => {
            warn!("Request failed: {} {}", response.status(), response.url());
            false
        }
        None => false,
    }
}
