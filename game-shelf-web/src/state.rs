use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::error::WebError;
use crate::render::Templates;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(conn: Connection, templates: Templates) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            templates: Arc::new(templates),
        }
    }

    /// Run `f` against the database on the blocking thread pool.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&Connection) -> Result<T, WebError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| WebError::internal("database lock poisoned"))?;
            f(&conn)
        })
        .await?
    }
}
