//! The concept map page: subject picker, learning path, topic list, the
//! selected topic's diagram and the shared detail panel.

use leptos::callback::Callback;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::controller::TopicNavigator;
use super::state::{NavigationState, Phase, TopicContent};
use crate::api::HttpApi;
use crate::components::detail_view::{DetailView, SelectionPanel};
use crate::components::dispatcher::VisualDispatcher;
use crate::config::AppConfig;
use crate::model::{Roadmap, SelectionEvent};
use crate::organizer::OrganizedChapter;
use crate::session::Session;

type Navigator = StoredValue<TopicNavigator<HttpApi>, LocalStorage>;

/// Full concept map page.
///
/// Expects an [`HttpApi`] and a `RwSignal<Session>` in context; falls back to
/// same-origin defaults and a signed-out session without them.
#[component]
pub fn ConceptMapPage() -> impl IntoView {
	let api = use_context::<HttpApi>()
		.unwrap_or_else(|| HttpApi::from_config(&AppConfig::default()));
	let session =
		use_context::<RwSignal<Session>>().unwrap_or_else(|| RwSignal::new(Session::default()));

	let view_state = RwSignal::new(NavigationState::default());
	let navigator: Navigator = StoredValue::new_local(TopicNavigator::with_listener(
		api,
		move |state: &NavigationState| view_state.set(state.clone()),
	));
	let selection: RwSignal<Option<SelectionEvent>> = RwSignal::new(None);
	let on_select = Callback::new(move |event: SelectionEvent| selection.set(Some(event)));

	let nav = navigator.get_value();
	spawn_local(async move { nav.load_subjects().await });

	view! {
		<div class="concept-map-page">
			<NavBar session=session />
			<div class="concept-map-layout">
				<aside class="concept-map-sidebar">
					<SubjectPicker view_state=view_state navigator=navigator selection=selection />
					<LearningPath view_state=view_state />
					<ChapterList view_state=view_state navigator=navigator selection=selection />
				</aside>
				<main class="concept-map-content">
					<TopicView view_state=view_state navigator=navigator on_select=on_select />
				</main>
				<SelectionPanel
					selection=selection
					on_close=Callback::new(move |_: ()| selection.set(None))
				/>
			</div>
		</div>
	}
}

#[component]
fn NavBar(session: RwSignal<Session>) -> impl IntoView {
	view! {
		<nav class="concept-map-nav">
			{move || {
				session
					.get()
					.nav_links()
					.into_iter()
					.map(|link| view! { <a href=link.href>{link.label}</a> })
					.collect_view()
			}}
			{move || {
				session
					.with(|s| s.display_name.clone())
					.map(|name| view! { <span class="nav-user">{name}</span> })
			}}
		</nav>
	}
}

#[component]
fn SubjectPicker(
	view_state: RwSignal<NavigationState>,
	navigator: Navigator,
	selection: RwSignal<Option<SelectionEvent>>,
) -> impl IntoView {
	let subjects = Memo::new(move |_| view_state.with(|s| s.subjects().to_vec()));
	let current = Memo::new(move |_| view_state.with(|s| s.subject_id().map(str::to_string)));

	let on_change = move |ev: leptos::ev::Event| {
		let id = event_target_value(&ev);
		if id.is_empty() {
			return;
		}
		selection.set(None);
		let nav = navigator.get_value();
		spawn_local(async move { nav.select_subject(&id).await });
	};

	view! {
		<div class="subject-picker">
			<label for="concept-map-subject">"Subject"</label>
			{move || {
				view_state
					.with(|s| s.subjects_error().map(str::to_string))
					.map(|e| view! { <p class="inline-error">{format!("Subjects unavailable: {e}")}</p> })
			}}
			<select
				id="concept-map-subject"
				on:change=on_change
				disabled=move || view_state.with(NavigationState::subjects_loading)
			>
				<option value="" prop:selected=move || current.get().is_none()>
					{move || {
						if view_state.with(NavigationState::subjects_loading) {
							"Loading subjects…"
						} else {
							"Choose a subject"
						}
					}}
				</option>
				<For each=move || subjects.get() key=|subject| subject.id.clone() let:subject>
					{
						let id = subject.id.clone();
						view! {
							<option
								value=subject.id.clone()
								prop:selected=move || current.get().as_deref() == Some(id.as_str())
							>
								{subject.name.clone()}
							</option>
						}
					}
				</For>
			</select>
		</div>
	}
}

#[component]
fn LearningPath(view_state: RwSignal<NavigationState>) -> impl IntoView {
	let roadmap = Memo::new(move |_| view_state.with(|s| s.roadmap().cloned()));
	let loading = Memo::new(move |_| view_state.with(NavigationState::roadmap_loading));

	move || {
		if loading.get() {
			return Some(view! { <p class="roadmap-loading">"Loading learning path…"</p> }.into_any());
		}
		roadmap.get().map(roadmap_view)
	}
}

fn roadmap_view(roadmap: Roadmap) -> AnyView {
	view! {
		<section class="learning-path">
			{(!roadmap.title.is_empty()).then(|| view! { <h2>{roadmap.title.clone()}</h2> })}
			{roadmap.description.clone().map(|d| view! { <p class="roadmap-description">{d}</p> })}
			{roadmap
				.learning_path
				.clone()
				.map(|value| {
					view! {
						<div class="roadmap-block">
							<h3>"Learning path"</h3>
							<DetailView value=value />
						</div>
					}
				})}
			{(!roadmap.study_tips.is_empty())
				.then(|| {
					view! {
						<div class="roadmap-block">
							<h3>"Study tips"</h3>
							<ul>
								{roadmap
									.study_tips
									.iter()
									.map(|tip| view! { <li>{tip.clone()}</li> })
									.collect_view()}
							</ul>
						</div>
					}
				})}
			{roadmap
				.exam_strategy
				.clone()
				.map(|value| {
					view! {
						<div class="roadmap-block">
							<h3>"Exam strategy"</h3>
							<DetailView value=value />
						</div>
					}
				})}
		</section>
	}
	.into_any()
}

#[component]
fn ChapterList(
	view_state: RwSignal<NavigationState>,
	navigator: Navigator,
	selection: RwSignal<Option<SelectionEvent>>,
) -> impl IntoView {
	let chapters = Memo::new(move |_| view_state.with(NavigationState::chapters));
	let phase = Memo::new(move |_| view_state.with(NavigationState::phase));
	let active = Memo::new(move |_| {
		view_state.with(|s| s.selected().map(|content| content.topic().id.clone()))
	});

	move || match phase.get() {
		Phase::NoSubject => view! { <p class="hint">"Select a subject to begin."</p> }.into_any(),
		Phase::LoadingTopics => view! { <p class="loading">"Loading topics…"</p> }.into_any(),
		Phase::TopicsUnavailable => view! {
			<p class="inline-error">"Topics for this subject are not available yet."</p>
		}
		.into_any(),
		Phase::TopicsReady | Phase::TopicSelected => view! {
			<ol class="chapters">
				{chapters
					.get()
					.into_iter()
					.map(|chapter| chapter_view(chapter, navigator, selection, active))
					.collect_view()}
			</ol>
		}
		.into_any(),
	}
}

fn chapter_view(
	chapter: OrganizedChapter,
	navigator: Navigator,
	selection: RwSignal<Option<SelectionEvent>>,
	active: Memo<Option<String>>,
) -> impl IntoView {
	let meta = chapter.meta.clone().map(|meta| {
		let badges: Vec<String> = [
			meta.estimated_time.map(|t| format!("⏱ {t}")),
			meta.difficulty.map(|d| format!("Difficulty: {d}")),
			meta.importance.map(|i| format!("Importance: {i}")),
		]
		.into_iter()
		.flatten()
		.collect();
		view! {
			<div class="chapter-meta">
				{badges.into_iter().map(|b| view! { <span class="badge">{b}</span> }).collect_view()}
				{(!meta.key_takeaways.is_empty())
					.then(|| {
						view! {
							<ul class="key-takeaways">
								{meta
									.key_takeaways
									.iter()
									.map(|k| view! { <li>{k.clone()}</li> })
									.collect_view()}
							</ul>
						}
					})}
			</div>
		}
	});

	view! {
		<li class="chapter">
			<h3 class="chapter-title">{chapter.chapter_title}</h3>
			{meta}
			<ul class="chapter-topics">
				{chapter
					.topics
					.into_iter()
					.map(|topic| {
						let id = topic.id.clone();
						let is_active = {
							let id = id.clone();
							move || active.get().as_deref() == Some(id.as_str())
						};
						view! {
							<li>
								<button
									class="topic-link"
									class:active=is_active
									on:click=move |_| {
										selection.set(None);
										let nav = navigator.get_value();
										let id = id.clone();
										spawn_local(async move { nav.select_topic(&id).await });
									}
								>
									{topic.title}
								</button>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</li>
	}
}

#[component]
fn TopicView(
	view_state: RwSignal<NavigationState>,
	navigator: Navigator,
	on_select: Callback<SelectionEvent>,
) -> impl IntoView {
	let content = Memo::new(move |_| view_state.with(|s| s.selected().cloned()));

	move || {
		let Some(content) = content.get() else {
			let hint = match view_state.with(NavigationState::phase) {
				Phase::TopicsReady => "Select a topic to explore.",
				_ => "",
			};
			return view! { <p class="hint">{hint}</p> }.into_any();
		};
		let loading = matches!(content, TopicContent::Loading(_));
		let topic = content.topic().clone();
		view! {
			<article class="topic">
				<header class="topic-header">
					<h2>{topic.title.clone()}</h2>
					<button
						class="topic-close"
						on:click=move |_| navigator.with_value(|nav| nav.clear_topic())
					>
						"Back to topics"
					</button>
				</header>
				{topic.description.clone().map(|d| view! { <p class="topic-description">{d}</p> })}
				{if loading {
					view! { <p class="loading">"Loading topic…"</p> }.into_any()
				} else {
					view! {
						<VisualDispatcher
							kind=topic.visual_type.clone()
							payload=topic.visual_data.clone()
							on_select=on_select
						/>
					}
						.into_any()
				}}
			</article>
		}
		.into_any()
	}
}
