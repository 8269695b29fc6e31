//! Host-page configuration.
//!
//! The page embeds a `<script type="application/json" id="concept-map-config">`
//! element; anything it leaves out falls back to [`AppConfig::default`].

use serde::Deserialize;

use crate::session::Session;

/// Element id of the embedded configuration.
pub const CONFIG_ELEMENT_ID: &str = "concept-map-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
	/// Prefix for every API path; empty means same origin.
	pub api_base: String,
	/// Upper bound for any single request, including the map asset.
	pub request_timeout_ms: u32,
	pub map_asset_path: String,
	/// Session state known when the page was served.
	pub session: Session,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			request_timeout_ms: 15_000,
			map_asset_path: "/conceptmap/map/india-map.svg".to_string(),
			session: Session::default(),
		}
	}
}

impl AppConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
