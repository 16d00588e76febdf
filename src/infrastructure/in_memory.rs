use crate::domain::checkout::CheckoutRecord;
use crate::domain::ports::{CheckoutStore, ProgramStore, UserStore};
use crate::domain::program::{FundingProgram, ProgramFilter, ProgramUpdate};
use crate::domain::user::UserAccount;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory catalog store.
///
/// Uses `Arc<RwLock<HashMap>>` to allow shared concurrent access. Ideal for
/// testing or local runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryProgramStore {
    programs: Arc<RwLock<HashMap<Uuid, FundingProgram>>>,
}

impl InMemoryProgramStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgramStore for InMemoryProgramStore {
    async fn insert(&self, program: FundingProgram) -> Result<()> {
        let mut programs = self.programs.write().await;
        programs.insert(program.id, program);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<FundingProgram>> {
        let programs = self.programs.read().await;
        Ok(programs.get(&id).cloned())
    }

    async fn find(&self, filter: &ProgramFilter) -> Result<Vec<FundingProgram>> {
        let programs = self.programs.read().await;
        let mut matching: Vec<_> = programs
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(matching)
    }

    async fn update(&self, id: Uuid, changes: ProgramUpdate) -> Result<Option<FundingProgram>> {
        let mut programs = self.programs.write().await;
        Ok(programs.get_mut(&id).map(|program| {
            program.apply(changes);
            program.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut programs = self.programs.write().await;
        Ok(programs.remove(&id).is_some())
    }
}

/// A thread-safe in-memory user store, keyed by email.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert(&self, user: UserAccount) -> Result<UserAccount> {
        let mut users = self.users.write().await;
        let stored = match users.get(&user.email) {
            // Re-registration keeps the original identity and creation time.
            Some(existing) => UserAccount {
                id: existing.id,
                created_at: existing.created_at,
                ..user
            },
            None => user,
        };
        users.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }
}

/// A thread-safe in-memory checkout audit store.
#[derive(Default, Clone)]
pub struct InMemoryCheckoutStore {
    records: Arc<RwLock<HashMap<Uuid, CheckoutRecord>>>,
}

impl InMemoryCheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckoutStore for InMemoryCheckoutStore {
    async fn insert(&self, record: CheckoutRecord) -> Result<Uuid> {
        let mut records = self.records.write().await;
        let id = record.id;
        records.insert(id, record);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CheckoutRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }
}
