use std::sync::Arc;

use crate::config::Config;
use crate::forms::FormSchema;
use crate::mail::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Arc<Mailer>,
    pub form: &'static FormSchema,
}

impl AppState {
    pub fn new(config: Config, mailer: Mailer) -> Self {
        let form = FormSchema::for_kind(config.form_kind);
        Self {
            config: Arc::new(config),
            mailer: Arc::new(mailer),
            form,
        }
    }
}
