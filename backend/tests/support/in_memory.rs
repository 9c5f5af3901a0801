//! In-memory port doubles for end-to-end HTTP tests without PostgreSQL.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use gadget_registry::domain::ports::{
    GadgetPersistenceError, GadgetRepository, NewUser, UserPersistenceError, UserRepository,
};
use gadget_registry::domain::{
    Codename, Email, Gadget, GadgetId, GadgetMutation, GadgetStatus, GadgetWithCreator,
    StoredCredentials, User, UserId,
};

/// Users and gadgets shared by both repositories so listings can resolve
/// creator emails the way the SQL join does.
#[derive(Default)]
struct Store {
    users: Vec<StoredCredentials>,
    gadgets: Vec<Gadget>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryStore {
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn gadgets(&self) -> InMemoryGadgetRepository {
        InMemoryGadgetRepository {
            store: self.clone(),
        }
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn gadget(&self, id: &GadgetId) -> Option<Gadget> {
        self.lock().gadgets.iter().find(|g| g.id() == *id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.inner.lock().expect("in-memory store poisoned")
    }
}

#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self
            .store
            .lock()
            .users
            .iter()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.store.lock();
        if store.users.iter().any(|stored| stored.user.email() == &user.email) {
            return Err(UserPersistenceError::DuplicateEmail {
                email: user.email.to_string(),
            });
        }
        let next_id = i32::try_from(store.users.len() + 1).expect("user id fits in i32");
        let created = User::new(
            UserId::new(next_id).expect("positive id"),
            user.email.clone(),
            Utc::now(),
        );
        store.users.push(StoredCredentials {
            user: created.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(created)
    }
}

#[derive(Clone)]
pub struct InMemoryGadgetRepository {
    store: InMemoryStore,
}

#[async_trait]
impl GadgetRepository for InMemoryGadgetRepository {
    async fn list(
        &self,
        status: Option<GadgetStatus>,
    ) -> Result<Vec<GadgetWithCreator>, GadgetPersistenceError> {
        let store = self.store.lock();
        let mut rows: Vec<GadgetWithCreator> = store
            .gadgets
            .iter()
            .filter(|gadget| status.is_none_or(|wanted| gadget.status() == wanted))
            .map(|gadget| GadgetWithCreator {
                gadget: gadget.clone(),
                creator_email: store
                    .users
                    .iter()
                    .find(|stored| stored.user.id() == gadget.created_by())
                    .map(|stored| stored.user.email().clone()),
            })
            .collect();
        rows.sort_by(|a, b| b.gadget.created_at().cmp(&a.gadget.created_at()));
        Ok(rows)
    }

    async fn find_by_id(&self, id: &GadgetId) -> Result<Option<Gadget>, GadgetPersistenceError> {
        Ok(self.store.gadget(id))
    }

    async fn codename_exists(&self, codename: &Codename) -> Result<bool, GadgetPersistenceError> {
        Ok(self
            .store
            .lock()
            .gadgets
            .iter()
            .any(|gadget| gadget.codename() == codename))
    }

    async fn insert(&self, gadget: &Gadget) -> Result<(), GadgetPersistenceError> {
        self.store.lock().gadgets.push(gadget.clone());
        Ok(())
    }

    async fn apply(
        &self,
        id: &GadgetId,
        mutation: &GadgetMutation,
    ) -> Result<Option<Gadget>, GadgetPersistenceError> {
        let mut store = self.store.lock();
        let Some(slot) = store.gadgets.iter_mut().find(|gadget| gadget.id() == *id) else {
            return Ok(None);
        };
        *slot = slot.with_mutation(mutation);
        Ok(Some(slot.clone()))
    }
}
