use async_trait::async_trait;
use funding_trail::application::checkout::CheckoutWorkflow;
use funding_trail::domain::checkout::{CheckoutRecord, CustomerDetails, GatewayCheckoutResult};
use funding_trail::domain::ports::{
    CheckoutStore, NotificationSender, PaymentGateway, TemplateKind,
};
use funding_trail::error::{Result, ServiceError};
use funding_trail::infrastructure::in_memory::{InMemoryProgramStore, InMemoryUserStore};
use funding_trail::interfaces::http::AppState;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Records every charge and can be told to fail, standing in for the remote
/// processor without the network.
#[derive(Clone)]
pub struct MockGateway {
    charges: Arc<RwLock<Vec<(CustomerDetails, u64, String)>>>,
    result: GatewayCheckoutResult,
    fail: Arc<RwLock<bool>>,
}

impl MockGateway {
    pub fn returning(status: &str, transaction_id: &str) -> Self {
        Self {
            charges: Arc::new(RwLock::new(Vec::new())),
            result: GatewayCheckoutResult {
                status: status.to_string(),
                transaction_id: transaction_id.to_string(),
            },
            fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn charges(&self) -> Vec<(CustomerDetails, u64, String)> {
        self.charges.read().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
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

/// Records sends and can be told to fail.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sends: Arc<RwLock<Vec<(String, TemplateKind)>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockNotifier {
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn sends(&self) -> Vec<(String, TemplateKind)> {
        self.sends.read().await.clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotifier {
    async fn send(&self, to: &str, template: TemplateKind) -> Result<()> {
        if *self.fail.read().await {
            return Err(ServiceError::Notification("smtp refused".to_string()));
        }
        self.sends.write().await.push((to.to_string(), template));
        Ok(())
    }
}

/// Checkout store double with read access to everything written.
#[derive(Clone, Default)]
pub struct RecordingCheckoutStore {
    records: Arc<RwLock<Vec<CheckoutRecord>>>,
    fail: Arc<RwLock<bool>>,
}

impl RecordingCheckoutStore {
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn records(&self) -> Vec<CheckoutRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl CheckoutStore for RecordingCheckoutStore {
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

pub fn workflow_with(
    gateway: &MockGateway,
    notifier: &MockNotifier,
    store: &RecordingCheckoutStore,
) -> CheckoutWorkflow {
    CheckoutWorkflow::new(
        Box::new(gateway.clone()),
        Box::new(notifier.clone()),
        Box::new(store.clone()),
    )
}

pub fn app_state_with(
    gateway: &MockGateway,
    notifier: &MockNotifier,
    store: &RecordingCheckoutStore,
) -> AppState {
    AppState::new(
        Arc::new(workflow_with(gateway, notifier, store)),
        Arc::new(InMemoryProgramStore::new()),
        Arc::new(InMemoryUserStore::new()),
        vec!["http://localhost:5173".to_string()],
    )
}
