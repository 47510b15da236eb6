//! Inventory Insights Frontend Entry Point

mod actions;
mod app;
mod commands;
mod components;
mod context;
mod download;
mod form;
mod history;
mod models;
mod state;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
