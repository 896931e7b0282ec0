use leptos::prelude::*;
use skill_galaxy::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
