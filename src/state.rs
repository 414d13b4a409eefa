use std::ops::{Deref, DerefMut};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use diesel::{
    SqliteConnection,
    r2d2::{ConnectionManager, Pool, PooledConnection},
};

use crate::{auth::token::TokenKey, util_resp::FailureResponse};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: DbPool,
    pub token_key: TokenKey,
}

/// A pooled database connection, checked out for the duration of one
/// request. `pool.get()` blocks, so it runs on the blocking thread pool.
pub struct Conn {
    inner: PooledConnection<ConnectionManager<SqliteConnection>>,
}

impl Deref for Conn {
    type Target = PooledConnection<ConnectionManager<SqliteConnection>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Conn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Conn
where
    S: Send + Sync,
    DbPool: FromRef<S>,
{
    type Rejection = FailureResponse;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let pool = DbPool::from_ref(state);

        let inner = tokio::task::spawn_blocking(move || pool.get())
            .await
            .map_err(|_| FailureResponse::ServerError(()))?
            .map_err(|e| {
                tracing::error!(error = %e, "failed to check out connection");
                FailureResponse::ServerError(())
            })?;

        Ok(Conn { inner })
    }
}
