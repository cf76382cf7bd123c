use anyhow::{Result, bail};
use log::debug;

use crate::{
    api::{Device, DeviceId, FrameClient},
    runtime::Runtime,
};

/// The given device, or the first one on the account.
pub(super) async fn resolve_device<R: Runtime>(
    client: &mut FrameClient<R>,
    device: Option<DeviceId>,
) -> Result<DeviceId> {
    if let Some(id) = device {
        return Ok(id);
    }
    match client.devices().await.into_iter().next() {
        Some(first) => {
            debug!("Using first device {}", first.id);
            Ok(first.id)
        }
        None => bail!("No devices found"),
    }
}

fn on_off(state: Option<bool>) -> &'static str {
    match state {
        Some(true) => "on",
        Some(false) => "off",
        None => "unknown",
    }
}

fn print_device(device: &Device) {
    let artwork = device
        .current_artwork()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}\t{}\tbacklight {}\tartwork {}",
        device.id,
        device.display_name(),
        on_off(device.backlight_state),
        artwork
    );
}

#[tracing::instrument(skip(client))]
pub async fn devices<R: Runtime>(client: &mut FrameClient<R>) -> Result<()> {
    let devices = client.devices().await;
    if devices.is_empty() {
        println!("No devices.");
        return Ok(());
    }
    for device in &devices {
        print_device(device);
    }
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn backlight<R: Runtime>(
    client: &mut FrameClient<R>,
    device: Option<DeviceId>,
    on: bool,
) -> Result<()> {
    let id = resolve_device(client, device).await?;
    match client.set_backlight(&id, on).await {
        Some(device) => {
            print_device(&device);
            Ok(())
        }
        None => bail!("Unable to switch backlight of device {}", id),
    }
}

#[tracing::instrument(skip(client))]
pub async fn sleep<R: Runtime>(
    client: &mut FrameClient<R>,
    device: Option<DeviceId>,
    enabled: bool,
) -> Result<()> {
    let id = resolve_device(client, device).await?;
    if !client.set_sleep_enabled(&id, enabled).await {
        bail!("Unable to change sleep setting of device {}", id);
    }
    println!(
        "Sleep {} on device {}",
        if enabled { "enabled" } else { "disabled" },
        id
    );
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn sleep_schedule<R: Runtime>(
    client: &mut FrameClient<R>,
    device: Option<DeviceId>,
    wake: &str,
    sleep: &str,
) -> Result<()> {
    let id = resolve_device(client, device).await?;
    if !client.set_sleep_schedule(&id, wake, sleep).await {
        bail!("Unable to set sleep schedule of device {}", id);
    }
    println!("Device {} sleeps at {} and wakes at {}", id, sleep, wake);
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn current<R: Runtime>(client: &mut FrameClient<R>, device: Option<DeviceId>) -> Result<()> {
    let id = resolve_device(client, device).await?;
    match client.current_artwork(&id).await {
        Some(artwork) => {
            println!("{}", artwork);
            Ok(())
        }
        None => bail!("No current artwork for device {}", id),
    }
}
