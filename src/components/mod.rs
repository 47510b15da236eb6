//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod error_banner;
mod recent_searches;
mod results_table;
mod search_form;

pub use confirm_button::ConfirmButton;
pub use error_banner::ErrorBanner;
pub use recent_searches::RecentSearches;
pub use results_table::ResultsTable;
pub use search_form::SearchForm;
