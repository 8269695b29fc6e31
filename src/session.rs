//! Explicit session context for navigation.
//!
//! Whether the user is signed in decides which navigation links are offered.
//! The value is handed to the page as a context signal and refreshed only by
//! the host dispatching a [`SESSION_EVENT`] on `window`; no component reads
//! browser storage for it.

use leptos::prelude::*;
use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::CustomEvent;

/// `CustomEvent` type the host dispatches with the new session as `detail`.
pub const SESSION_EVENT: &str = "conceptmap:session";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
	pub authenticated: bool,
	pub display_name: Option<String>,
}

/// A navigation link and whether it needs a signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
	pub label: &'static str,
	pub href: &'static str,
	pub requires_auth: bool,
}

const NAV_LINKS: &[NavLink] = &[
	NavLink {
		label: "Concept Map",
		href: "/concept-map",
		requires_auth: false,
	},
	NavLink {
		label: "Smart Roadmap",
		href: "/smart-roadmap",
		requires_auth: true,
	},
	NavLink {
		label: "My Notes",
		href: "/notes",
		requires_auth: true,
	},
];

impl Session {
	/// Links this session may follow.
	pub fn nav_links(&self) -> Vec<NavLink> {
		NAV_LINKS
			.iter()
			.filter(|link| self.authenticated || !link.requires_auth)
			.cloned()
			.collect()
	}
}

/// Parses the `detail` of a session event, which may be a JSON string or object.
fn session_from_detail(detail: &JsValue) -> Option<Session> {
	let json = match detail.as_string() {
		Some(s) => s,
		None => js_sys::JSON::stringify(detail).ok()?.as_string()?,
	};
	match serde_json::from_str(&json) {
		Ok(session) => Some(session),
		Err(e) => {
			warn!("concept-map: ignoring malformed session event: {}", e);
			None
		}
	}
}

/// Keeps `session` in step with [`SESSION_EVENT`]s for the page's lifetime.
pub fn listen_for_session_updates(session: RwSignal<Session>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
		let Ok(ev) = ev.dyn_into::<CustomEvent>() else {
			return;
		};
		if let Some(next) = session_from_detail(&ev.detail()) {
			info!(
				"concept-map: session refreshed (authenticated={})",
				next.authenticated
			);
			session.set(next);
		}
	});
	let _ = window.add_event_listener_with_callback(SESSION_EVENT, handler.as_ref().unchecked_ref());
	// The page owns the listener until unload.
	handler.forget();
}
