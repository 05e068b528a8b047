use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::Role;

/// UserRecord
///
/// One row of the demo user table: credentials plus the dashboard the user
/// lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub redirect: String,
}

// 1. Repository Contract
/// UserRepository
///
/// Abstract lookup of users by email. Handlers only see this trait, so tests
/// can swap in their own table without touching routing code.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the user registered under `email`. The caller normalizes the
    /// email (trimmed, lowercase) beforehand; the lookup itself is exact.
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;
}

/// Shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn UserRepository>;

// 2. The Demo Implementation
/// StaticUserRepository
///
/// Fixed, in-memory table of the three demo accounts. Keys are stored
/// lowercase.
#[derive(Debug, Clone)]
pub struct StaticUserRepository {
    users: HashMap<String, UserRecord>,
}

impl StaticUserRepository {
    pub fn new() -> Self {
        Self::from_records([
            UserRecord {
                email: "admin@platform.com".to_string(),
                password: "admin123".to_string(),
                role: Role::Admin,
                redirect: "/admin1.html".to_string(),
            },
            UserRecord {
                email: "seller@test.com".to_string(),
                password: "seller123".to_string(),
                role: Role::Seller,
                redirect: "/seller.html".to_string(),
            },
            UserRecord {
                email: "manufacturer@test.com".to_string(),
                password: "manu123".to_string(),
                role: Role::Manufacturer,
                redirect: "/manu1.html".to_string(),
            },
        ])
    }

    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.email.to_lowercase(), record))
            .collect();
        Self { users }
    }
}

impl Default for StaticUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for StaticUserRepository {
    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.get(email).cloned()
    }
}
