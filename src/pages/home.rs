use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use crate::components::galaxy::{GalaxyCanvas, GalaxyData, GalaxyLink, GalaxyNode};
use crate::skills::{
	CompletedSet, LocalStorageStore, SkillCatalog, SkillState, default_catalog, mark_completed,
	unmark_completed,
};

/// Reachable skills as galaxy nodes, linked to their prerequisites.
///
/// A completed skill whose prerequisites were never finished yields links
/// to nodes that are not in the galaxy; the layout skips those.
fn galaxy_data(states: &[SkillState]) -> GalaxyData {
	let reachable: Vec<&SkillState> = states.iter().filter(|s| s.is_reachable()).collect();

	let nodes = reachable
		.iter()
		.map(|s| GalaxyNode {
			id: s.definition.id.clone(),
			name: s.definition.name.clone(),
			category: s.definition.category.clone(),
		})
		.collect();

	let links = reachable
		.iter()
		.flat_map(|s| {
			s.definition.prerequisite_ids.iter().map(|req| GalaxyLink {
				source: req.clone(),
				target: s.definition.id.clone(),
			})
		})
		.collect();

	GalaxyData { nodes, links }
}

/// States reordered so that every skill is listed after its prerequisites.
fn in_learning_order(order: &[String], states: &[SkillState]) -> Vec<SkillState> {
	order
		.iter()
		.filter_map(|id| states.iter().find(|s| s.id() == id))
		.cloned()
		.collect()
}

fn load_completed() -> CompletedSet {
	match LocalStorageStore::open() {
		Ok(store) => store.load_or_default(),
		Err(e) => {
			warn!("Progress will not be saved: {}", e);
			CompletedSet::new()
		}
	}
}

fn status_label(skill: &SkillState) -> &'static str {
	if skill.completed {
		"completed"
	} else if skill.unlocked {
		"unlocked"
	} else {
		"locked"
	}
}

#[component]
fn SkillGalaxy(catalog: SkillCatalog) -> impl IntoView {
	let catalog = Arc::new(catalog);
	let total = catalog.skills().len();
	let completed = RwSignal::new(load_completed());

	let catalog_states = catalog.clone();
	let states = Memo::new(move |_| catalog_states.resolve(&completed.get()));
	let graph_data = Signal::derive(move || galaxy_data(&states.get()));

	let toggle = move |id: String, done: bool| {
		let saved = LocalStorageStore::open().and_then(|mut store| {
			if done {
				unmark_completed(&mut store, &id)
			} else {
				mark_completed(&mut store, &id)
			}
		});
		match saved {
			Ok(set) => completed.set(set),
			Err(e) => {
				warn!("Could not save progress: {}", e);
				completed.update(|set| {
					if done {
						set.remove(&id);
					} else {
						set.insert(id);
					}
				});
			}
		}
	};

	let catalog_list = catalog.clone();
	view! {
		<div class="fullscreen-graph">
			<GalaxyCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Skill Galaxy"</h1>
				<p class="subtitle">
					{move || {
						let done = states.with(|s| s.iter().filter(|s| s.completed).count());
						format!("{} / {} skills completed", done, total)
					}}
				</p>
				<Show when=move || graph_data.with(|d| d.nodes.is_empty())>
					<p class="galaxy-empty">"Complete a skill to see your galaxy!"</p>
				</Show>
			</div>
			<ul class="skill-list">
				{move || {
					states
						.with(|s| in_learning_order(catalog_list.topological_order(), s))
						.into_iter()
						.map(|skill| {
							let id = skill.id().to_string();
							let done = skill.completed;
							let locked = !skill.unlocked && !done;
							let class = format!("skill {}", status_label(&skill));
							let unlocks = catalog_list
								.dependents(skill.id())
								.map(|s| s.name.clone())
								.collect::<Vec<_>>()
								.join(", ");
							view! {
								<li class=class>
									<span class="skill-name">{skill.definition.name.clone()}</span>
									<span class="skill-status">{status_label(&skill)}</span>
									<p class="skill-description">
										{skill.definition.description.clone()}
									</p>
									{(!unlocks.is_empty())
										.then(|| {
											view! { <p class="skill-unlocks">"Unlocks: " {unlocks}</p> }
										})}
									<button disabled=locked on:click=move |_| toggle(id.clone(), done)>
										{if done { "Undo" } else { "Mark complete" }}
									</button>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || default_catalog().map(|catalog| view! { <SkillGalaxy catalog=catalog /> })}
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn states(done: &[&str]) -> Vec<SkillState> {
		let done: CompletedSet = done.iter().map(|id| id.to_string()).collect();
		default_catalog().unwrap().resolve(&done)
	}

	fn ids(data: &GalaxyData) -> Vec<&str> {
		data.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn fresh_user_sees_only_the_root() {
		let data = galaxy_data(&states(&[]));
		assert_eq!(ids(&data), vec!["html"]);
		assert!(data.links.is_empty());
	}

	#[test]
	fn completing_a_skill_reveals_what_it_unlocks() {
		let data = galaxy_data(&states(&["html"]));
		assert_eq!(ids(&data), vec!["html", "css", "javascript", "git"]);
		assert_eq!(data.links.len(), 3);
		assert!(data.links.iter().all(|l| l.source == "html"));
		assert_eq!(data.nodes[1].category, "Frontend");
	}

	#[test]
	fn orphaned_completion_produces_dangling_link() {
		// docker completed without git: docker is shown, its link is not resolvable
		let data = galaxy_data(&states(&["docker"]));
		assert!(ids(&data).contains(&"docker"));
		assert!(!ids(&data).contains(&"git"));
		assert!(data.links.iter().any(|l| l.source == "git" && l.target == "docker"));
	}

	#[test]
	fn list_follows_prerequisites() {
		let catalog = default_catalog().unwrap();
		let ordered = in_learning_order(catalog.topological_order(), &states(&["html"]));
		let order: Vec<_> = ordered.iter().map(|s| s.id()).collect();
		assert_eq!(order.len(), 16);
		assert_eq!(&order[..4], &["html", "css", "javascript", "git"]);
		let pos = |id| order.iter().position(|o| *o == id).unwrap();
		assert!(pos("react") < pos("next.js"));
		assert!(pos("git") < pos("docker"));
	}

	#[test]
	fn status_labels() {
		let s = states(&["html"]);
		assert_eq!(status_label(&s[0]), "completed");
		assert_eq!(status_label(&s[1]), "unlocked");
		assert_eq!(status_label(&s[2]), "locked");
	}
}
