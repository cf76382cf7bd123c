use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Ids arrive either as JSON numbers or strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.trim().to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                Self(n.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(String::from(raw)))
            }
        }
    };
}

opaque_id!(
    /// Opaque artwork identifier.
    ArtworkId
);

opaque_id!(
    /// Opaque device identifier.
    DeviceId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: Option<String>,
    pub artist_name: Option<String>,
}

/// An entry of the favorited-artworks listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub artwork: Artwork,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ArtworkRef {
    #[serde(default)]
    id: Option<ArtworkId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reproduction {
    artwork: Option<ArtworkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DisplayPayload {
    #[serde(rename = "ref")]
    reference: Option<ArtworkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DisplayEvent {
    payload: Option<DisplayPayload>,
}

/// A frame as listed by the devices endpoint. Always fetched fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: Option<String>,
    pub release_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub backlight_state: Option<bool>,
    reproduction: Option<Reproduction>,
    current_display_event: Option<DisplayEvent>,
}

impl Device {
    /// The artwork on screen, from the reproduction if present, else the
    /// last display event.
    pub fn current_artwork(&self) -> Option<&ArtworkId> {
        let from_reproduction = self
            .reproduction
            .as_ref()
            .and_then(|r| r.artwork.as_ref())
            .and_then(|a| a.id.as_ref());

        from_reproduction.or_else(|| {
            self.current_display_event
                .as_ref()
                .and_then(|e| e.payload.as_ref())
                .and_then(|p| p.reference.as_ref())
                .and_then(|a| a.id.as_ref())
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

/// A JSON array decoded entry by entry. Entries that do not decode are
/// logged and skipped instead of failing the whole listing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LenientList<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> LenientList<T> {
    /// Entries received, including skipped ones.
    pub fn received(&self) -> usize {
        self.items.len() + self.skipped
    }
}

impl<T> Default for LenientList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LenientList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let mut list = LenientList::default();
        for entry in raw {
            match serde_json::from_value(entry) {
                Ok(item) => list.items.push(item),
                Err(e) => {
                    warn!("Skipping malformed entry: {}", e);
                    list.skipped += 1;
                }
            }
        }
        Ok(list)
    }
}

/// Accepts `true`/`false` as JSON booleans or strings.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBool {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<RawBool>::deserialize(deserializer)? {
        Some(RawBool::Bool(b)) => Some(b),
        Some(RawBool::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => Some(true),
            "false" | "off" | "0" => Some(false),
            _ => None,
        },
        None => None,
    })
}
