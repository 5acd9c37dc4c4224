//! Payments service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        orders::repositories::PgOrdersRepository,
        payments::{
            data::NewPayment,
            errors::PaymentsServiceError,
            records::{PaymentRecord, PaymentUuid},
            repository::{PgPaymentsRepository, TRANSACTION_ID_CONSTRAINT},
            status::PaymentStatus,
        },
    },
};

/// Attempts at drawing an unused transaction id.
const TRANSACTION_ID_ATTEMPTS: usize = 3;

/// `TXN` followed by eight uppercase hex digits.
pub fn generate_transaction_id() -> String {
    format!("TXN{:08X}", rand::random::<u32>())
}

fn is_transaction_id_collision(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|error| error.constraint())
        .is_some_and(|constraint| constraint == TRANSACTION_ID_CONSTRAINT)
}

#[derive(Debug, Clone)]
pub struct PgPaymentsService {
    db: Db,
    repository: PgPaymentsRepository,
    orders_repository: PgOrdersRepository,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPaymentsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn create_payment(
        &self,
        mut payment: NewPayment,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        payment.mobile_number = payment
            .mobile_number
            .map(|number| number.trim().to_string())
            .filter(|number| !number.is_empty());

        let mut attempt = 1;

        loop {
            let transaction_id = generate_transaction_id();

            let mut tx = self.db.begin_transaction().await?;

            let result = self
                .repository
                .create_payment(&mut tx, &payment, &transaction_id)
                .await;

            match result {
                Ok(created) => {
                    tx.commit().await?;

                    info!(
                        transaction_id = %created.transaction_id,
                        order = %created.order,
                        method = %created.payment_method,
                        "payment created"
                    );

                    return Ok(created);
                }
                Err(error)
                    if attempt < TRANSACTION_ID_ATTEMPTS && is_transaction_id_collision(&error) =>
                {
                    warn!(%transaction_id, attempt, "transaction id collision, retrying");
                    attempt += 1;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    async fn get_payment(
        &self,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let payment = self.repository.get_payment(&mut tx, payment).await?;

        tx.commit().await?;

        Ok(payment)
    }

    async fn update_status(
        &self,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_payment(&mut tx, payment).await?;

        let next = current.status.transition(status)?;

        let updated = self
            .repository
            .update_payment_status(&mut tx, payment, next)
            .await?;

        if next == PaymentStatus::Completed {
            self.orders_repository
                .mark_order_paid(&mut tx, updated.order)
                .await?;
        }

        tx.commit().await?;

        info!(
            transaction_id = %updated.transaction_id,
            from = %current.status,
            to = %updated.status,
            "payment status changed"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Records a pending payment against an existing order.
    async fn create_payment(
        &self,
        payment: NewPayment,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// Retrieve a single payment.
    async fn get_payment(
        &self,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// Moves a payment to `status`. Completing a payment marks its order paid.
    async fn update_status(
        &self,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, PaymentsServiceError>;
}
