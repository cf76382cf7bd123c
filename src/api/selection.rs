//! Random favorite selection.

use rand::Rng;
use rand::seq::SliceRandom;

use super::types::{ArtworkId, Favorite};

/// Pick a random favorite, avoiding `excluded` when there is a choice.
///
/// A single favorite is returned even if it is the excluded one. If every
/// favorite carries the excluded id, any of them may be returned.
pub fn choose_random_item<'a, G>(
    items: &'a [Favorite],
    excluded: Option<&ArtworkId>,
    rng: &mut G,
) -> Option<&'a Favorite>
where
    G: Rng + ?Sized,
{
    match items {
        [] => None,
        [only] => Some(only),
        _ => {
            let candidates: Vec<&Favorite> = items
                .iter()
                .filter(|item| Some(&item.artwork.id) != excluded)
                .collect();

            if candidates.is_empty() {
                items.choose(rng)
            } else {
                candidates.choose(rng).copied()
            }
        }
    }
}
