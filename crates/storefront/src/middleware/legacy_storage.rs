//! Request-time hook for the legacy-storage cleanup.
//!
//! The cleanup belongs to the client-startup lifecycle; in a server-rendered
//! app the first request that carries a session is the closest equivalent.
//! The marker key makes repeated invocation free, so this simply runs on
//! every request that has a session.

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::services::legacy_storage::{SessionStore, run_migration};

/// Run the legacy-storage migrator against the request's session, if any.
///
/// Fire-and-forget: storage failures are logged and the request proceeds.
/// Requests without a session extension (the session layer not applied)
/// skip silently.
pub async fn legacy_cleanup(request: Request, next: Next) -> Response {
    let session = request.extensions().get::<Session>().cloned();
    let store = session.as_ref().map(SessionStore::new);

    if let Err(error) = run_migration(store.as_ref()).await {
        tracing::warn!(%error, "legacy storage cleanup failed");
    }

    next.run(request).await
}
