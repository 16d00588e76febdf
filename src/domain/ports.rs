use super::checkout::{CheckoutRecord, CustomerDetails, GatewayCheckoutResult};
use super::program::{FundingProgram, ProgramFilter, ProgramUpdate};
use super::user::UserAccount;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Template selector for outbound notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    PaymentConfirmation,
}

/// One opaque call to the remote payment processor. No retry lives behind
/// this trait; callers needing retry must wrap it.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        customer: &CustomerDetails,
        amount_minor: u64,
        currency: &str,
    ) -> Result<GatewayCheckoutResult>;
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, to: &str, template: TemplateKind) -> Result<()>;
}

#[async_trait]
pub trait CheckoutStore: Send + Sync {
    async fn insert(&self, record: CheckoutRecord) -> Result<Uuid>;
    async fn get(&self, id: Uuid) -> Result<Option<CheckoutRecord>>;
}

#[async_trait]
pub trait ProgramStore: Send + Sync {
    async fn insert(&self, program: FundingProgram) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<FundingProgram>>;
    async fn find(&self, filter: &ProgramFilter) -> Result<Vec<FundingProgram>>;
    async fn update(&self, id: Uuid, changes: ProgramUpdate) -> Result<Option<FundingProgram>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn upsert(&self, user: UserAccount) -> Result<UserAccount>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type NotificationSenderBox = Box<dyn NotificationSender>;
pub type CheckoutStoreBox = Box<dyn CheckoutStore>;
