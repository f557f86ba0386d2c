// src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é aceitável aqui: se a configuração falhar, a aplicação
    // não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::me));

    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    let partner_routes = Router::new()
        .route(
            "/",
            get(handlers::partners::list_partners).post(handlers::partners::create_partner),
        )
        .route(
            "/{id}",
            put(handlers::partners::update_partner).delete(handlers::partners::delete_partner),
        );

    let certificate_routes = Router::new()
        .route(
            "/",
            get(handlers::certificates::list_certificates)
                .post(handlers::certificates::create_certificate),
        )
        .route(
            "/{id}",
            axum::routing::delete(handlers::certificates::delete_certificate),
        );

    let contract_routes = Router::new()
        .route(
            "/",
            get(handlers::contracts::list_contracts).post(handlers::contracts::create_contract),
        )
        // As planilhas legadas chegam a alguns MB; o padrão de 2 MB não basta.
        .route(
            "/import",
            post(handlers::import::import_contracts).layer(DefaultBodyLimit::max(20 * 1024 * 1024)),
        )
        .route(
            "/{id}",
            put(handlers::contracts::update_contract)
                .delete(handlers::contracts::delete_contract),
        );

    let message_routes = Router::new().route(
        "/",
        get(handlers::messages::list_messages).post(handlers::messages::create_message),
    );

    let payment_routes = Router::new()
        .route(
            "/",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route("/{id}", get(handlers::payments::get_payment));

    let dashboard_routes =
        Router::new().route("/summary", get(handlers::dashboard::get_summary));

    // Tudo que não é login/registro fica atrás da guarda de autenticação.
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/clients", client_routes)
        .nest("/partners", partner_routes)
        .nest("/certificates", certificate_routes)
        .nest("/contracts", contract_routes)
        .nest("/messages", message_routes)
        .nest("/payments", payment_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
