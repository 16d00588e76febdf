use crate::domain::checkout::CheckoutRecord;
use crate::domain::ports::{CheckoutStore, ProgramStore, UserStore};
use crate::domain::program::{FundingProgram, ProgramFilter, ProgramUpdate};
use crate::domain::user::UserAccount;
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for the program catalog.
pub const CF_PROGRAMS: &str = "programs";
/// Column Family for user accounts, keyed by email.
pub const CF_USERS: &str = "users";
/// Column Family for checkout audit records.
pub const CF_CHECKOUTS: &str = "checkouts";

/// A persistent store implementation using RocksDB.
///
/// One handle serves all three store ports, with a separate Column Family per
/// entity and JSON-encoded values.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_PROGRAMS, Options::default()),
            ColumnFamilyDescriptor::new(CF_USERS, Options::default()),
            ColumnFamilyDescriptor::new(CF_CHECKOUTS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| ServiceError::Storage(format!("{name} column family not found")))
    }
}

#[async_trait]
impl ProgramStore for RocksDBStore {
    async fn insert(&self, program: FundingProgram) -> Result<()> {
        let cf = self.cf(CF_PROGRAMS)?;
        let value = serde_json::to_vec(&program)?;
        self.db.put_cf(cf, program.id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<FundingProgram>> {
        let cf = self.cf(CF_PROGRAMS)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn find(&self, filter: &ProgramFilter) -> Result<Vec<FundingProgram>> {
        let cf = self.cf(CF_PROGRAMS)?;
        let mut matching = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let program: FundingProgram = serde_json::from_slice(&value)?;
            if filter.matches(&program) {
                matching.push(program);
            }
        }
        matching.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(matching)
    }

    async fn update(&self, id: Uuid, changes: ProgramUpdate) -> Result<Option<FundingProgram>> {
        let cf = self.cf(CF_PROGRAMS)?;
        let Some(bytes) = self.db.get_cf(cf, id.as_bytes())? else {
            return Ok(None);
        };
        let mut program: FundingProgram = serde_json::from_slice(&bytes)?;
        program.apply(changes);
        let value = serde_json::to_vec(&program)?;
        self.db.put_cf(cf, id.as_bytes(), value)?;
        Ok(Some(program))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let cf = self.cf(CF_PROGRAMS)?;
        let exists = self.db.get_pinned_cf(cf, id.as_bytes())?.is_some();
        if exists {
            self.db.delete_cf(cf, id.as_bytes())?;
        }
        Ok(exists)
    }
}

#[async_trait]
impl UserStore for RocksDBStore {
    async fn upsert(&self, user: UserAccount) -> Result<UserAccount> {
        let cf = self.cf(CF_USERS)?;
        let stored = match self.db.get_cf(cf, user.email.as_bytes())? {
            Some(bytes) => {
                let existing: UserAccount = serde_json::from_slice(&bytes)?;
                UserAccount {
                    id: existing.id,
                    created_at: existing.created_at,
                    ..user
                }
            }
            None => user,
        };
        let value = serde_json::to_vec(&stored)?;
        self.db.put_cf(cf, stored.email.as_bytes(), value)?;
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let cf = self.cf(CF_USERS)?;
        match self.db.get_cf(cf, email.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CheckoutStore for RocksDBStore {
    async fn insert(&self, record: CheckoutRecord) -> Result<Uuid> {
        let cf = self.cf(CF_CHECKOUTS)?;
        let id = record.id;
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(cf, id.as_bytes(), value)?;
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CheckoutRecord>> {
        let cf = self.cf(CF_CHECKOUTS)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
