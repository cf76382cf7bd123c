//! Device control: backlight, sleep schedule, current artwork.
//!
//! Settings are changed with a PUT on the device resource carrying the new
//! values as query parameters.

use log::warn;

use super::Endpoint;
use super::client::{FrameClient, succeeded};
use super::types::{ArtworkId, Device, DeviceId};
use crate::http::ApiRequest;
use crate::runtime::Runtime;

impl<R: Runtime> FrameClient<R> {
    /// Fresh state of one device.
    #[tracing::instrument(skip(self))]
    pub async fn device(&mut self, id: &DeviceId) -> Option<Device> {
        let device = self.devices().await.into_iter().find(|d| &d.id == id);
        if device.is_none() {
            warn!("Device {} not found", id);
        }
        device
    }

    /// Turn the backlight on or off, then return the refreshed device.
    #[tracing::instrument(skip(self))]
    pub async fn set_backlight(&mut self, id: &DeviceId, on: bool) -> Option<Device> {
        let request = device_request(id).param("backlight_state", on);
        if !succeeded(self.http.request(&request).await) {
            return None;
        }
        self.device(id).await
    }

    /// Set when the device goes to sleep and wakes up. Times are 24-hour
    /// `HH:MM:SS` strings.
    #[tracing::instrument(skip(self))]
    pub async fn set_sleep_schedule(&mut self, id: &DeviceId, wake: &str, sleep: &str) -> bool {
        let request = device_request(id)
            .param("sleep_begin", sleep)
            .param("sleep_end", wake);
        succeeded(self.http.request(&request).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_sleep_enabled(&mut self, id: &DeviceId, enabled: bool) -> bool {
        let request = device_request(id).param("sleep_enabled", enabled);
        succeeded(self.http.request(&request).await)
    }

    /// The artwork currently on the device's screen.
    #[tracing::instrument(skip(self))]
    pub async fn current_artwork(&mut self, id: &DeviceId) -> Option<ArtworkId> {
        let device = self.device(id).await?;
        let artwork = device.current_artwork().cloned();
        if artwork.is_none() {
            warn!("Device {} reports no current artwork", id);
        }
        artwork
    }
}

fn device_request(id: &DeviceId) -> ApiRequest {
    ApiRequest::put(Endpoint::Devices.path()).append_path(id.as_str())
}
