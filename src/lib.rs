//! concept-map: interactive concept map client for exam preparation.
//!
//! Lets a learner pick a subject, browse its topics grouped into a learning
//! path, and explore each topic through the diagram its content calls for:
//! a map of India, a tree, a timeline, a flow or a layered stack.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod api;
pub mod components;
pub mod config;
pub mod diagnostics;
pub mod model;
pub mod navigation;
pub mod organizer;
pub mod regions;
pub mod session;

pub use api::{ConceptMapApi, FetchError, HttpApi};
pub use config::AppConfig;
pub use navigation::{ConceptMapPage, TopicNavigator};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("concept-map: logging initialized");
}

/// Load configuration from the script element with id="concept-map-config".
///
/// A missing element yields the defaults; a malformed one is logged and also
/// yields the defaults.
fn load_config() -> AppConfig {
	let text = (|| {
		let window: Window = web_sys::window()?;
		let element = window
			.document()?
			.get_element_by_id(config::CONFIG_ELEMENT_ID)?;
		let script: HtmlScriptElement = element.dyn_into().ok()?;
		script.text().ok()
	})();

	match text.map(|t| AppConfig::from_json(&t)) {
		Some(Ok(config)) => {
			info!(
				"concept-map: config loaded (api base {:?}, timeout {} ms)",
				config.api_base, config.request_timeout_ms
			);
			config
		}
		Some(Err(e)) => {
			warn!("concept-map: failed to parse config: {}", e);
			AppConfig::default()
		}
		None => AppConfig::default(),
	}
}

/// Main application component.
/// Provides the API client and session context, then renders the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let session = RwSignal::new(config.session.clone());
	session::listen_for_session_updates(session);
	provide_context(session);
	provide_context(HttpApi::from_config(&config));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Concept Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ConceptMapPage />
	}
}
