use canvass::{MIGRATIONS, config::create_app, state::DbPool};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| ":memory:".to_string());

    tracing::info!(location = %db_url, "opening database");

    let pool: DbPool = Pool::builder()
        .max_size(if db_url == ":memory:" { 1 } else { 10 })
        .build(ConnectionManager::new(db_url))
        .unwrap();

    {
        let pool = pool.clone();
        spawn_blocking(move || {
            let mut conn = pool.get().unwrap();
            conn.run_pending_migrations(MIGRATIONS).unwrap();
        })
        .await
        .unwrap();
    }

    let app = create_app(pool);

    let addr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.unwrap();
}
