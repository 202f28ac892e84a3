//! Knowledge graph explorer: a layout and analysis engine for learning
//! graphs, plus the Leptos client-side app that draws it.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
pub mod engine;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Route console logging through `log` and report panics to the browser.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("learning map: logging ready");
}

/// The learning map at `/`; every other path gets the not-found page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Learning Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			// the map is the only page; unknown paths fall back
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
