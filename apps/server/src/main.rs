use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware, web, App, HttpServer};
use std::sync::Arc;

use bugtrack::config;
use bugtrack::db;
use bugtrack::functions::FunctionSettings;
use bugtrack::middleware::auth::RequireAuth;
use bugtrack::routes;
use bugtrack::services::{
    create_mailer, BugNotifier, BugStore, BugSubmission, EmailSender, FunctionNotifier,
    PgBugStore,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("Starting Bugtrack server on {}:{}", config.host, config.port);

    let db_pool = db::create_pool(&config.database).await.map_err(|e| {
        log::error!("Database pool error: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    db::run_migrations(&db_pool).await.map_err(|e| {
        log::error!("Migration error: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // Collaborators of the submission flow and the notification function
    let store: Arc<dyn BugStore> = Arc::new(PgBugStore::new(db_pool.clone()));
    let notifier: Arc<dyn BugNotifier> = Arc::new(
        FunctionNotifier::from_config(&config.functions).map_err(|e| {
            log::error!("Notification client error: {}", e);
            std::io::Error::other(e.to_string())
        })?,
    );
    let mailer: Arc<dyn EmailSender> = create_mailer(&config.email).map_err(|e| {
        log::error!("Email provider error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!(
        "Notifications go to {} via {}",
        config.functions.send_bug_email_url(),
        mailer.provider()
    );

    let submission = web::Data::new(BugSubmission::new(store.clone(), notifier));
    let store = web::Data::from(store);
    let mailer = web::Data::from(mailer);
    let function_settings = web::Data::new(FunctionSettings {
        from_address: config.email.from_address.clone(),
        token: config.functions.token.clone(),
    });

    let secret_key = match &config.security.session_secret_key {
        Some(key) => key.clone(),
        None => {
            log::warn!(
                "SESSION_SECRET_KEY not set, using random key (sessions won't persist across restarts)"
            );
            use rand::Rng;
            let random_bytes: Vec<u8> = (0..64).map(|_| rand::rng().random()).collect();
            hex::encode(random_bytes)
        }
    };

    let key = Key::from(secret_key.as_bytes());

    let host = config.host.clone();
    let port = config.port;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(store.clone())
            .app_data(submission.clone())
            .app_data(mailer.clone())
            .app_data(function_settings.clone())
            .wrap(RequireAuth)
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_name("bugtrack_session".to_string())
                    .cookie_secure(config.security.ssl_proxy)
                    .cookie_http_only(true)
                    .cookie_same_site(actix_web::cookie::SameSite::Lax)
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
