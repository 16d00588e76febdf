use crate::domain::checkout::{CheckoutRecord, CheckoutRequest, GatewayCheckoutResult};
use crate::domain::ports::{
    CheckoutStoreBox, NotificationSenderBox, PaymentGatewayBox, TemplateKind,
};
use crate::error::Result;
use tracing::{info, warn};

/// Currency the processor is invoiced in. Input prices are currency-agnostic.
const INVOICE_CURRENCY: &str = "USD";

/// Executes one payment attempt end to end.
///
/// The workflow performs a single gateway charge followed by two best-effort
/// side effects (confirmation email, then the audit record), strictly in that
/// order. It is at-most-once: no step is retried and no completed step is
/// undone when a later one fails.
pub struct CheckoutWorkflow {
    gateway: PaymentGatewayBox,
    notifier: NotificationSenderBox,
    checkouts: CheckoutStoreBox,
}

impl CheckoutWorkflow {
    /// Creates a workflow over the given collaborators.
    ///
    /// Collaborators are injected here rather than reached through process
    /// globals, so tests can substitute fakes.
    pub fn new(
        gateway: PaymentGatewayBox,
        notifier: NotificationSenderBox,
        checkouts: CheckoutStoreBox,
    ) -> Self {
        Self {
            gateway,
            notifier,
            checkouts,
        }
    }

    /// Runs one checkout: validate, charge, then notify and persist.
    ///
    /// Returns the raw gateway result. The gateway's reported status string
    /// is recorded but never branched on; only a failed call fails the
    /// checkout. A gateway failure returns before either side effect runs.
    pub async fn process_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<GatewayCheckoutResult> {
        let (customer, amount) = request.validate()?;

        let result = self
            .gateway
            .charge(&customer, amount, INVOICE_CURRENCY)
            .await?;
        info!(
            amount,
            status = %result.status,
            transaction_id = %result.transaction_id,
            "gateway charge completed"
        );

        best_effort(
            "confirmation email",
            self.notifier
                .send(&customer.email, TemplateKind::PaymentConfirmation)
                .await,
        );

        let record = CheckoutRecord::new(&request, &result);
        best_effort(
            "checkout record write",
            self.checkouts.insert(record).await.map(|_| ()),
        );

        Ok(result)
    }
}

/// Logs and swallows a side-effect failure.
///
/// A completed charge must not be failed by a notification or audit-trail
/// problem; the error is surfaced in the logs only.
fn best_effort(context: &str, result: Result<()>) {
    if let Err(err) = result {
        warn!(%err, "{context} failed after successful charge");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::CustomerDetails;
    use crate::domain::ports::{CheckoutStore, NotificationSender, PaymentGateway};
    use crate::error::ServiceError;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    #[derive(Clone)]
    struct RecordingGateway {
        charges: Arc<RwLock<Vec<(CustomerDetails, u64, String)>>>,
        result: GatewayCheckoutResult,
        fail: Arc<RwLock<bool>>,
    }

    impl RecordingGateway {
        fn returning(status: &str, transaction_id: &str) -> Self {
            Self {
                charges: Arc::new(RwLock::new(Vec::new())),
                result: GatewayCheckoutResult {
                    status: status.to_string(),
                    transaction_id: transaction_id.to_string(),
                },
                fail: Arc::new(RwLock::new(false)),
            }
        }

        async fn set_fail(&self, fail: bool) {
            *self.fail.write().await = fail;
        }

        async fn charges(&self) -> Vec<(CustomerDetails, u64, String)> {
            self.charges.read().await.clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn charge(
            &self,
            customer: &CustomerDetails,
            amount_minor: u64,
            currency: &str,
        ) -> Result<GatewayCheckoutResult> {
            if *self.fail.read().await {
                return Err(ServiceError::Gateway("connection refused".to_string()));
            }
            self.charges
                .write()
                .await
                .push((customer.clone(), amount_minor, currency.to_string()));
            Ok(self.result.clone())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sends: Arc<RwLock<Vec<(String, TemplateKind)>>>,
        fail: Arc<RwLock<bool>>,
    }

    impl RecordingNotifier {
        async fn set_fail(&self, fail: bool) {
            *self.fail.write().await = fail;
        }

        async fn sends(&self) -> Vec<(String, TemplateKind)> {
            self.sends.read().await.clone()
        }
    }

    #[async_trait]
    impl NotificationSender for RecordingNotifier {
        async fn send(&self, to: &str, template: TemplateKind) -> Result<()> {
            if *self.fail.read().await {
                return Err(ServiceError::Notification("smtp refused".to_string()));
            }
            self.sends.write().await.push((to.to_string(), template));
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        records: Arc<RwLock<Vec<CheckoutRecord>>>,
        fail: Arc<RwLock<bool>>,
    }

    impl RecordingStore {
        async fn set_fail(&self, fail: bool) {
            *self.fail.write().await = fail;
        }

        async fn records(&self) -> Vec<CheckoutRecord> {
            self.records.read().await.clone()
        }
    }

    #[async_trait]
    impl CheckoutStore for RecordingStore {
        async fn insert(&self, record: CheckoutRecord) -> Result<Uuid> {
            if *self.fail.read().await {
                return Err(ServiceError::Storage("connection lost".to_string()));
            }
            let id = record.id;
            self.records.write().await.push(record);
            Ok(id)
        }

        async fn get(&self, id: Uuid) -> Result<Option<CheckoutRecord>> {
            Ok(self
                .records
                .read()
                .await
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }
    }

    fn ada_request() -> CheckoutRequest {
        CheckoutRequest {
            first_name: "Ada".to_string(),
            phone: "5551234".to_string(),
            email: "ada@example.com".to_string(),
            country: "US".to_string(),
            total_price: Some(dec!(49.99)),
        }
    }

    fn workflow(
        gateway: &RecordingGateway,
        notifier: &RecordingNotifier,
        store: &RecordingStore,
    ) -> CheckoutWorkflow {
        CheckoutWorkflow::new(
            Box::new(gateway.clone()),
            Box::new(notifier.clone()),
            Box::new(store.clone()),
        )
    }

    #[tokio::test]
    async fn test_gateway_called_once_with_truncated_amount() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();

        workflow(&gateway, &notifier, &store)
            .process_checkout(ada_request())
            .await
            .unwrap();

        let charges = gateway.charges().await;
        assert_eq!(charges.len(), 1);
        let (customer, amount, currency) = &charges[0];
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(*amount, 4999);
        assert_eq!(currency, "USD");
    }

    #[tokio::test]
    async fn test_subcent_amount_truncates_not_rounds() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();

        let mut request = ada_request();
        request.total_price = Some(dec!(10.999));
        workflow(&gateway, &notifier, &store)
            .process_checkout(request)
            .await
            .unwrap();

        assert_eq!(gateway.charges().await[0].1, 1099);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_collaborators() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();
        let flow = workflow(&gateway, &notifier, &store);

        let mut no_email = ada_request();
        no_email.email.clear();
        assert!(matches!(
            flow.process_checkout(no_email).await,
            Err(ServiceError::Validation(_))
        ));

        let mut zero_after_truncation = ada_request();
        zero_after_truncation.total_price = Some(dec!(0.004));
        assert!(matches!(
            flow.process_checkout(zero_after_truncation).await,
            Err(ServiceError::Validation(_))
        ));

        assert!(gateway.charges().await.is_empty());
        assert!(notifier.sends().await.is_empty());
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_skips_both_side_effects() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        gateway.set_fail(true).await;
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();

        let outcome = workflow(&gateway, &notifier, &store)
            .process_checkout(ada_request())
            .await;

        assert!(matches!(outcome, Err(ServiceError::Gateway(_))));
        assert!(notifier.sends().await.is_empty());
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_pending_status_still_notifies_and_persists() {
        let gateway = RecordingGateway::returning("pending", "tx_9");
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();

        let result = workflow(&gateway, &notifier, &store)
            .process_checkout(ada_request())
            .await
            .unwrap();

        assert_eq!(result.status, "pending");
        assert_eq!(notifier.sends().await.len(), 1);
        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payment_status, "pending");
        assert_eq!(records[0].transaction_id, "tx_9");
    }

    #[tokio::test]
    async fn test_notifier_failure_does_not_block_persistence_or_success() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        let notifier = RecordingNotifier::default();
        notifier.set_fail(true).await;
        let store = RecordingStore::default();

        let result = workflow(&gateway, &notifier, &store)
            .process_checkout(ada_request())
            .await
            .unwrap();

        assert_eq!(result.transaction_id, "tx_1");
        assert_eq!(store.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();
        store.set_fail(true).await;

        let result = workflow(&gateway, &notifier, &store)
            .process_checkout(ada_request())
            .await
            .unwrap();

        assert_eq!(result.status, "success");
        assert_eq!(notifier.sends().await.len(), 1);
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_copies_gateway_audit_fields() {
        let gateway = RecordingGateway::returning("success", "tx_1");
        let notifier = RecordingNotifier::default();
        let store = RecordingStore::default();

        workflow(&gateway, &notifier, &store)
            .process_checkout(ada_request())
            .await
            .unwrap();

        let records = store.records().await;
        assert_eq!(records[0].payment_status, "success");
        assert_eq!(records[0].transaction_id, "tx_1");
        assert_eq!(records[0].total_price, dec!(49.99));
    }
}
