//! Client for the read-only concept map REST API.
//!
//! [`ConceptMapApi`] is the seam the navigation controller and the geographic
//! renderer fetch through; [`HttpApi`] implements it with the browser `fetch`
//! API. Every request races a timer, and a `404` on the roadmap or topic
//! detail endpoints is a valid "not there yet" answer rather than an error.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{self, Either};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

use crate::config::AppConfig;
use crate::model::{
	Roadmap, Subject, SubjectsResponse, Topic, TopicDetailResponse, TopicsResponse,
};

/// Transport-level failure of a request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
	#[error("network error: {0}")]
	Network(String),
	#[error("HTTP {0}")]
	Status(u16),
	#[error("invalid response body: {0}")]
	Decode(String),
	#[error("request timed out after {0} ms")]
	Timeout(u32),
	#[error("browser window unavailable")]
	Unavailable,
}

impl FetchError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, FetchError::Status(404))
	}
}

/// Read access to the concept map backend.
#[async_trait(?Send)]
pub trait ConceptMapApi {
	/// `GET /conceptmap/subjects`
	async fn subjects(&self) -> Result<Vec<Subject>, FetchError>;

	/// `GET /conceptmap/topics/{subjectId}`
	async fn topics(&self, subject_id: &str) -> Result<Vec<Topic>, FetchError>;

	/// `GET /conceptmap/roadmap/{subjectId}`; `Ok(None)` when none exists yet.
	async fn roadmap(&self, subject_id: &str) -> Result<Option<Roadmap>, FetchError>;

	/// `GET /conceptmap/topic/{topicId}?subject={subjectId}`; `Ok(None)` on 404.
	async fn topic_detail(
		&self,
		topic_id: &str,
		subject_id: &str,
	) -> Result<Option<Topic>, FetchError>;

	/// The India vector map as SVG text.
	async fn map_asset(&self) -> Result<String, FetchError>;
}

/// Parses a JSON body.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
	serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Maps a `404` to `Ok(None)`.
pub fn optional<T>(result: Result<T, FetchError>) -> Result<Option<T>, FetchError> {
	match result {
		Ok(value) => Ok(Some(value)),
		Err(e) if e.is_not_found() => Ok(None),
		Err(e) => Err(e),
	}
}

/// Resolves `request` unless `deadline` fires first.
pub async fn with_deadline<T, R, D>(request: R, deadline: D, timeout_ms: u32) -> Result<T, FetchError>
where
	R: Future<Output = Result<T, FetchError>>,
	D: Future<Output = ()>,
{
	match future::select(Box::pin(request), Box::pin(deadline)).await {
		Either::Left((result, _)) => result,
		Either::Right(((), _)) => Err(FetchError::Timeout(timeout_ms)),
	}
}

/// Percent-encodes one path segment.
fn encode_segment(segment: &str) -> String {
	url::form_urlencoded::byte_serialize(segment.as_bytes())
		.collect::<String>()
		.replace('+', "%20")
}

/// `fetch`-backed implementation used in the browser.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpApi {
	base_url: String,
	timeout_ms: u32,
	map_asset_path: String,
}

impl HttpApi {
	pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			timeout_ms,
			map_asset_path: AppConfig::default().map_asset_path,
		}
	}

	pub fn from_config(config: &AppConfig) -> Self {
		Self {
			map_asset_path: config.map_asset_path.clone(),
			..Self::new(config.api_base.clone(), config.request_timeout_ms)
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	fn subjects_url(&self) -> String {
		self.url("/conceptmap/subjects")
	}

	fn topics_url(&self, subject_id: &str) -> String {
		self.url(&format!("/conceptmap/topics/{}", encode_segment(subject_id)))
	}

	fn roadmap_url(&self, subject_id: &str) -> String {
		self.url(&format!("/conceptmap/roadmap/{}", encode_segment(subject_id)))
	}

	fn topic_url(&self, topic_id: &str, subject_id: &str) -> String {
		self.url(&format!(
			"/conceptmap/topic/{}?subject={}",
			encode_segment(topic_id),
			encode_segment(subject_id)
		))
	}

	/// GETs `url` as text, bounded by the configured timeout.
	async fn get_text(&self, url: &str) -> Result<String, FetchError> {
		with_deadline(fetch_text(url), sleep(self.timeout_ms), self.timeout_ms).await
	}

	async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
		decode(&self.get_text(url).await?)
	}
}

#[async_trait(?Send)]
impl ConceptMapApi for HttpApi {
	async fn subjects(&self) -> Result<Vec<Subject>, FetchError> {
		let response: SubjectsResponse = self.get_json(&self.subjects_url()).await?;
		Ok(response.subjects)
	}

	async fn topics(&self, subject_id: &str) -> Result<Vec<Topic>, FetchError> {
		let response: TopicsResponse = self.get_json(&self.topics_url(subject_id)).await?;
		Ok(response.topics)
	}

	async fn roadmap(&self, subject_id: &str) -> Result<Option<Roadmap>, FetchError> {
		optional(self.get_json(&self.roadmap_url(subject_id)).await)
	}

	async fn topic_detail(
		&self,
		topic_id: &str,
		subject_id: &str,
	) -> Result<Option<Topic>, FetchError> {
		let response: Option<TopicDetailResponse> =
			optional(self.get_json(&self.topic_url(topic_id, subject_id)).await)?;
		Ok(response.map(TopicDetailResponse::into_topic))
	}

	async fn map_asset(&self) -> Result<String, FetchError> {
		self.get_text(&self.url(&self.map_asset_path)).await
	}
}

async fn fetch_text(url: &str) -> Result<String, FetchError> {
	let window = web_sys::window().ok_or(FetchError::Unavailable)?;

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);
	opts.set_credentials(RequestCredentials::Include);

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| FetchError::Network(format!("{:?}", e)))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| FetchError::Network(format!("{:?}", e)))?
		.dyn_into()
		.map_err(|_| FetchError::Network("fetch did not yield a Response".to_string()))?;

	if !response.ok() {
		return Err(FetchError::Status(response.status()));
	}

	let text = response
		.text()
		.map_err(|e| FetchError::Decode(format!("{:?}", e)))?;
	JsFuture::from(text)
		.await
		.map_err(|e| FetchError::Decode(format!("{:?}", e)))?
		.as_string()
		.ok_or_else(|| FetchError::Decode("body is not text".to_string()))
}

/// Resolves after `ms` milliseconds on the browser timer.
async fn sleep(ms: u32) {
	let Some(window) = web_sys::window() else {
		return future::pending().await;
	};
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			&resolve,
			ms.min(i32::MAX as u32) as i32,
		);
	});
	let _ = JsFuture::from(promise).await;
}
