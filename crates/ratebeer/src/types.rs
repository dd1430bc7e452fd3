//! Documents returned by RateBeer.
//!
//! The service's beer schema is treated as opaque JSON. Only the `id`
//! and `url` keys are ever inspected.

use serde_json::Value;

/// A beer document as returned by the service.
pub type RemoteEntity = serde_json::Map<String, Value>;

/// Key holding the service-side beer id.
pub const ID_FIELD: &str = "id";

/// Key holding the relative URL of the full beer page.
pub const URL_FIELD: &str = "url";

/// Best match returned by a name search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    /// Location of the full document, when the search result carries one.
    pub url: Option<String>,
    /// The search result itself.
    pub document: RemoteEntity,
}

impl SearchCandidate {
    /// Wrap a search result, lifting out its non-empty `url` key.
    pub fn from_document(document: RemoteEntity) -> Self {
        let url = document
            .get(URL_FIELD)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        Self { url, document }
    }
}
