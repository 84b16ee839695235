use sea_orm::DatabaseConnection;

/// Shared by all handlers. Services are built per request from `db`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
