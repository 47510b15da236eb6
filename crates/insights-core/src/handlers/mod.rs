//! Request Orchestration
//!
//! One async handler per UI action. Each checks the session token first,
//! then calls into the report layer and packages the response.

mod error;
mod filters;
mod search;
mod security;
mod stock;

use std::sync::Arc;

use crate::repository::{ProductCatalog, TermStore};

pub use error::{CommandError, ErrorKind};
pub use filters::{describe_filter, get_categories, get_filter_values};
pub use search::{export, search, ExportParams, ExportPayload, SearchResponse};
pub use security::SessionToken;
pub use stock::{enable_stock, update_quantity};

pub type CommandResult<T> = Result<T, CommandError>;

/// Everything a handler needs, owned by the app and passed into each call
#[derive(Clone)]
pub struct InsightsContext {
    pub catalog: Arc<dyn ProductCatalog>,
    pub terms: Arc<dyn TermStore>,
    pub session: SessionToken,
    /// File name prefix of CSV exports
    pub export_prefix: String,
}

impl InsightsContext {
    fn authorize(&self, nonce: &str, action: &str) -> CommandResult<()> {
        log::debug!("[{}] request", action);
        self.session.verify(nonce).map_err(CommandError::from)
    }
}
