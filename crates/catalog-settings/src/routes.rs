//! API routes

use axum::{
	Router,
	routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	Router::new()
		.route("/api/v1/settings", get(handler::list_settings).put(handler::put_setting))
		.route("/api/v1/settings/filter/{entity_name}/add", put(handler::add_entity_filter))
		.route(
			"/api/v1/settings/{setting_name}",
			get(handler::get_setting).patch(handler::patch_setting),
		)
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
