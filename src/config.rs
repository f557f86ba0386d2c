// src/config.rs

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::db::{
    certificate_repo::CertificateRepository, client_repo::ClientRepository,
    contract_repo::ContractRepository, dashboard_repo::DashboardRepository,
    message_repo::MessageRepository, partner_repo::PartnerRepository,
    payment_repo::PaymentRepository, user_repo::UserRepository,
};
use crate::services::{
    auth::AuthService, client_service::ClientService, contract_service::ContractService,
    import::resolver::EntityResolver, import::ImportService, payment_service::PaymentService,
};

// O estado global da aplicação: pool de conexões e o grafo de dependências
// (repositórios → serviços), montado uma única vez no boot.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repo: UserRepository,
    pub client_repo: ClientRepository,
    pub partner_repo: PartnerRepository,
    pub certificate_repo: CertificateRepository,
    pub contract_repo: ContractRepository,
    pub message_repo: MessageRepository,
    pub payment_repo: PaymentRepository,
    pub dashboard_repo: DashboardRepository,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub contract_service: ContractService,
    pub payment_service: PaymentService,
    pub import_service: ImportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL não está definida no .env")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET não está definida no .env")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("🔗 Conexão com o banco de dados estabelecida!");

        // ===== REPOSITÓRIOS =====
        let user_repo = UserRepository::new();
        let client_repo = ClientRepository::new();
        let partner_repo = PartnerRepository::new();
        let certificate_repo = CertificateRepository::new();
        let contract_repo = ContractRepository::new();
        let message_repo = MessageRepository::new();
        let payment_repo = PaymentRepository::new();
        let dashboard_repo = DashboardRepository::new();

        // ===== SERVIÇOS =====
        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let client_service = ClientService::new(client_repo.clone(), contract_repo.clone());
        let contract_service = ContractService::new(contract_repo.clone(), client_repo.clone());
        let payment_service = PaymentService::new(payment_repo.clone(), partner_repo.clone());
        let import_service = ImportService::new(EntityResolver::new(
            partner_repo.clone(),
            certificate_repo.clone(),
            client_repo.clone(),
            contract_repo.clone(),
        ));

        Ok(Self {
            db_pool,
            user_repo,
            client_repo,
            partner_repo,
            certificate_repo,
            contract_repo,
            message_repo,
            payment_repo,
            dashboard_repo,
            auth_service,
            client_service,
            contract_service,
            payment_service,
            import_service,
        })
    }
}
