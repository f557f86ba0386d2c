// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,

        // --- Clientes ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Parcerias ---
        handlers::partners::list_partners,
        handlers::partners::create_partner,
        handlers::partners::update_partner,
        handlers::partners::delete_partner,

        // --- Certificados ---
        handlers::certificates::list_certificates,
        handlers::certificates::create_certificate,
        handlers::certificates::delete_certificate,

        // --- Contratos ---
        handlers::contracts::list_contracts,
        handlers::contracts::create_contract,
        handlers::contracts::update_contract,
        handlers::contracts::delete_contract,
        handlers::import::import_contracts,

        // --- Mensagens ---
        handlers::messages::list_messages,
        handlers::messages::create_message,

        // --- Pagamentos ---
        handlers::payments::list_payments,
        handlers::payments::get_payment,
        handlers::payments::create_payment,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::client::PersonType,
            models::client::Client,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,

            // --- Parcerias ---
            models::partner::Partner,
            models::partner::CreatePartnerPayload,
            models::partner::UpdatePartnerPayload,

            // --- Certificados ---
            models::certificate::Certificate,
            models::certificate::CreateCertificatePayload,

            // --- Contratos ---
            models::contract::ContractStatus,
            models::contract::Contract,
            models::contract::CreateContractPayload,
            models::contract::UpdateContractPayload,

            // --- Import ---
            models::import::ImportRowError,
            models::import::ImportReport,

            // --- Mensagens ---
            models::message::SentMessage,
            models::message::CreateMessagePayload,

            // --- Pagamentos ---
            models::payment::PartnerPayment,
            models::payment::PaymentLineItem,
            models::payment::PaymentDetail,
            models::payment::CreatePaymentItemPayload,
            models::payment::CreatePaymentPayload,

            // --- Dashboard ---
            models::dashboard::StatusCount,
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Clientes", description = "Cadastro de Clientes"),
        (name = "Parcerias", description = "Escritórios de Parceria"),
        (name = "Certificados", description = "Tipos de Certificado Digital"),
        (name = "Contratos", description = "Contratos e Import de Planilhas"),
        (name = "Mensagens", description = "Auditoria de Envios de WhatsApp"),
        (name = "Pagamentos", description = "Comissões de Parcerias"),
        (name = "Dashboard", description = "Indicadores Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
