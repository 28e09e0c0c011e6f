use std::sync::Arc;

use super::{
    config::Config,
    mailer::{MailRelay, SmtpRelay},
    store::{FeedbackStore, MongoStore},
};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn FeedbackStore>,
    pub mailer: Arc<dyn MailRelay>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let store = MongoStore::connect(&config.mongo_url, &config.mongo_db)
            .await
            .expect("MongoDB misconfigured!");
        let mailer = SmtpRelay::new(&config).expect("SMTP relay misconfigured!");

        Arc::new(Self {
            config,
            store: Arc::new(store),
            mailer: Arc::new(mailer),
        })
    }

    /// Assembles state from explicit collaborators, used by tests to swap in
    /// in-memory doubles.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn FeedbackStore>,
        mailer: Arc<dyn MailRelay>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            mailer,
        })
    }
}
