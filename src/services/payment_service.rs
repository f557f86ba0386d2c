// src/services/payment_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{partner_repo::PartnerRepository, payment_repo::PaymentRepository},
    models::payment::{CreatePaymentPayload, PaymentDetail},
};

/// Comissão de um item: quantidade × valor unitário × percentual,
/// arredondado para centavos.
fn line_total(quantity: i32, unit_value: Decimal, commission_percent: Decimal) -> Decimal {
    (Decimal::from(quantity) * unit_value * commission_percent / Decimal::ONE_HUNDRED).round_dp(2)
}

#[derive(Clone)]
pub struct PaymentService {
    payment_repo: PaymentRepository,
    partner_repo: PartnerRepository,
}

impl PaymentService {
    pub fn new(payment_repo: PaymentRepository, partner_repo: PartnerRepository) -> Self {
        Self { payment_repo, partner_repo }
    }

    /// Cria o pagamento com seus itens numa transação; os totais são sempre
    /// recalculados no servidor, nunca aceitos do payload.
    pub async fn create_payment(
        &self,
        pool: &PgPool,
        payload: CreatePaymentPayload,
    ) -> Result<PaymentDetail, AppError> {
        let mut tx = pool.begin().await?;

        self.partner_repo
            .find_by_id(&mut *tx, payload.partner_id)
            .await?
            .ok_or(AppError::NotFound("Parceria"))?;

        let payment = self
            .payment_repo
            .create(&mut *tx, payload.partner_id, payload.reference_month)
            .await?;

        for item in &payload.items {
            let total = line_total(item.quantity, item.unit_value, item.commission_percent);
            self.payment_repo
                .add_item(
                    &mut *tx,
                    payment.id,
                    item.certificate_id,
                    item.quantity,
                    item.unit_value,
                    item.commission_percent,
                    total,
                )
                .await?;
        }

        let payment = self.payment_repo.recalculate_total(&mut *tx, payment.id).await?;
        let items = self.payment_repo.items_for(&mut *tx, payment.id).await?;

        tx.commit().await?;
        tracing::info!("💰 Pagamento criado para parceria {}: R$ {}", payload.partner_id, payment.total);

        Ok(PaymentDetail { payment, items })
    }

    pub async fn get_payment(&self, pool: &PgPool, id: Uuid) -> Result<PaymentDetail, AppError> {
        let payment = self
            .payment_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Pagamento"))?;
        let items = self.payment_repo.items_for(pool, id).await?;

        Ok(PaymentDetail { payment, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn comissao_por_item() {
        // 10 certificados a R$ 150,00 com 20% de comissão.
        assert_eq!(line_total(10, dec("150.00"), dec("20")), dec("300.00"));
    }

    #[test]
    fn comissao_arredonda_para_centavos() {
        // 3 × 99,99 × 12,5% = 37,496... → 37,50
        assert_eq!(line_total(3, dec("99.99"), dec("12.5")), dec("37.50"));
    }

    #[test]
    fn comissao_zero_e_zero() {
        assert_eq!(line_total(5, dec("200.00"), Decimal::ZERO), dec("0.00"));
    }
}
