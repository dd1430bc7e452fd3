//! URL construction for RateBeer beer pages.

use brewscrape_core::BeerId;
use rand::Rng;

/// Length of the throwaway slug placed in front of the beer id.
pub const SLUG_TOKEN_LEN: usize = 8;

/// Build the path used to fetch a beer directly by its id.
///
/// Beer pages live at `/beer/<slug>/<id>/`. The slug is not needed to
/// find the beer, so a random token stands in for it.
pub fn direct_beer_path(id: BeerId) -> String {
    let token: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SLUG_TOKEN_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("/beer/{token}/{id}/")
}
