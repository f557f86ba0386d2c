// src/db/payment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payment::{PartnerPayment, PaymentLineItem},
};

const PAYMENT_COLUMNS: &str =
    "id, partner_id, reference_month, total, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, payment_id, certificate_id, quantity, unit_value, \
     commission_percent, total, created_at";

#[derive(Clone)]
pub struct PaymentRepository;

impl PaymentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<PartnerPayment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, PartnerPayment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM partner_payments ORDER BY reference_month DESC"
        ))
        .fetch_all(executor)
        .await?;

        Ok(payments)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<PartnerPayment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, PartnerPayment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM partner_payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(payment)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        partner_id: Uuid,
        reference_month: NaiveDate,
    ) -> Result<PartnerPayment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, PartnerPayment>(&format!(
            r#"
            INSERT INTO partner_payments (partner_id, reference_month)
            VALUES ($1, $2)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(partner_id)
        .bind(reference_month)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }

    pub async fn add_item<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
        certificate_id: Uuid,
        quantity: i32,
        unit_value: Decimal,
        commission_percent: Decimal,
        total: Decimal,
    ) -> Result<PaymentLineItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, PaymentLineItem>(&format!(
            r#"
            INSERT INTO payment_line_items
                (payment_id, certificate_id, quantity, unit_value, commission_percent, total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(payment_id)
        .bind(certificate_id)
        .bind(quantity)
        .bind(unit_value)
        .bind(commission_percent)
        .bind(total)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn items_for<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
    ) -> Result<Vec<PaymentLineItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, PaymentLineItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM payment_line_items WHERE payment_id = $1
             ORDER BY created_at"
        ))
        .bind(payment_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    /// Recalcula o total do pagamento a partir dos itens persistidos.
    pub async fn recalculate_total<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
    ) -> Result<PartnerPayment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, PartnerPayment>(&format!(
            r#"
            UPDATE partner_payments SET
                total = COALESCE(
                    (SELECT SUM(total) FROM payment_line_items WHERE payment_id = $1), 0),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment_id)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }
}
