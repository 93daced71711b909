#![allow(warnings)]
//! Prompt Composer Frontend Entry Point

mod app;
mod components;
mod context;
mod host;
mod logging;
mod store;
mod surface;
mod transport;

use app::App;
use leptos::prelude::*;
use prompt_composer::HostConfig;

fn main() {
    console_error_panic_hook::set_once();

    let raw_config = host::read_host_config();
    let config = HostConfig::from_value(&raw_config);
    logging::init_logger(&config.log_level);
    tracing::info!(component = "Frontend", groups = config.button_groups.len(), "mounting prompt composer");

    mount_to_body(move || view! { <App raw_config=raw_config.clone() config=config.clone() /> });
}
