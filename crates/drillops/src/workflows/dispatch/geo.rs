use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::Coordinates;

/// Provider-assigned handle for a created map view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapHandle(pub String);

/// Provider-assigned handle for a placed marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub String);

/// A location result as the provider returned it. `raw` carries the
/// provider-defined payload untouched; the core only ever reads the
/// optional display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub address: Option<String>,
    pub position: Option<Coordinates>,
    #[serde(default)]
    pub raw: Value,
}

/// Opaque map collaborator. Implementations wrap whatever SDK the
/// deployment uses; the core never interprets provider internals.
pub trait MapProvider: Send + Sync {
    fn create_map(&self, center: Coordinates) -> Result<MapHandle, MapProviderError>;
    fn place_marker(
        &self,
        map: &MapHandle,
        position: Coordinates,
    ) -> Result<MarkerHandle, MapProviderError>;
    fn search(&self, query: &str) -> Result<Vec<PlaceResult>, MapProviderError>;
    fn reverse_geocode(&self, position: Coordinates)
        -> Result<Option<PlaceResult>, MapProviderError>;
}

/// Map collaborator failure.
#[derive(Debug, thiserror::Error)]
pub enum MapProviderError {
    #[error("map provider unavailable: {0}")]
    Unavailable(String),
    #[error("map provider rejected the request: {0}")]
    Rejected(String),
}
