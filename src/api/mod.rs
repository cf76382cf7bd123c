//! Picture frame API: artworks, favorites and devices.

mod client;
mod device;
pub mod selection;
mod types;

pub use client::FrameClient;
pub use selection::choose_random_item;
pub use types::{Artwork, ArtworkId, Device, DeviceId, Favorite};

/// Upper bound on favorites considered for random display.
pub const DEFAULT_MAX_FAVORITES: usize = 200;

/// Favorites fetched per page.
pub const DEFAULT_FAVORITES_PAGE_SIZE: usize = 30;

/// API endpoints, relative to the versioned API root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    User,
    Devices,
    Displayed,
    Favorited,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::User => "user/",
            Endpoint::Devices => "user/devices/",
            Endpoint::Displayed => "user/artworks/displayed/",
            Endpoint::Favorited => "user/artworks/favorited/",
        }
    }
}
