//! Keeps the local expense view in step with the remote store.
//!
//! Every operation takes `&mut self`, so a controller is the single writer of
//! its store: two mutations on the same record cannot overlap through one
//! instance. Nothing coordinates separate instances.

use engine::{
    DashboardView, Expense, ExpenseDraft, ExpenseId, ExpenseStore, FilterCriteria, summarize,
};

use crate::{
    client::{ClientError, ExpenseClient},
    config::MutationSync,
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Loading,
    Ready,
    Mutating,
    AuthExpired,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The session is gone; the user has to log in again.
    #[error("session expired")]
    AuthExpired,
    #[error("operation not allowed while {0:?}")]
    NotReady(SyncState),
    #[error("no expense is being edited")]
    NotEditing,
    #[error(transparent)]
    Client(ClientError),
}

impl From<ClientError> for SyncError {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::Unauthenticated => Self::AuthExpired,
            other => Self::Client(other),
        }
    }
}

type SyncResult<T> = Result<T, SyncError>;

enum Change {
    Upsert(Expense),
    Remove(ExpenseId),
}

pub struct SyncController {
    client: ExpenseClient,
    session: Session,
    mutation_sync: MutationSync,
    store: ExpenseStore,
    criteria: FilterCriteria,
    view: DashboardView,
    editing: Option<ExpenseId>,
    state: SyncState,
    /// Last state that was not in flight; restored on failure.
    stable: SyncState,
}

impl SyncController {
    pub fn new(client: ExpenseClient, session: Session, mutation_sync: MutationSync) -> Self {
        Self {
            client,
            session,
            mutation_sync,
            store: ExpenseStore::new(),
            criteria: FilterCriteria::default(),
            view: DashboardView::default(),
            editing: None,
            state: SyncState::Idle,
            stable: SyncState::Idle,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn editing(&self) -> Option<&ExpenseId> {
        self.editing.as_ref()
    }

    /// Initial load. Same as [`refresh`](Self::refresh).
    pub async fn activate(&mut self) -> SyncResult<()> {
        self.refresh().await
    }

    /// Re-lists every expense and replaces the store.
    pub async fn refresh(&mut self) -> SyncResult<()> {
        self.recover();
        match self.state {
            SyncState::AuthExpired => return Err(SyncError::AuthExpired),
            SyncState::Idle | SyncState::Ready => {}
            other => return Err(SyncError::NotReady(other)),
        }

        self.state = SyncState::Loading;
        match self.client.list().await {
            Ok(records) => {
                tracing::info!("loaded {} expenses", records.len());
                self.store.replace_all(records);
                self.settle_ready();
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn add(&mut self, draft: &ExpenseDraft) -> SyncResult<Expense> {
        self.begin_mutation()?;
        match self.client.create(draft).await {
            Ok(created) => {
                tracing::info!("expense {} created", created.id);
                self.finish_mutation(Change::Upsert(created.clone())).await?;
                Ok(created)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn edit(&mut self, id: &ExpenseId, draft: &ExpenseDraft) -> SyncResult<Expense> {
        self.begin_mutation()?;
        match self.client.update(id, draft).await {
            Ok(updated) => {
                tracing::info!("expense {} updated", updated.id);
                self.finish_mutation(Change::Upsert(updated.clone())).await?;
                Ok(updated)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn delete(&mut self, id: &ExpenseId) -> SyncResult<()> {
        self.begin_mutation()?;
        match self.client.delete(id).await {
            Ok(()) => {
                tracing::info!("expense {id} deleted");
                self.finish_mutation(Change::Remove(id.clone())).await
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Marks `id` as being edited and returns its current values, or `None`
    /// if the store does not hold it.
    pub fn begin_edit(&mut self, id: &ExpenseId) -> Option<ExpenseDraft> {
        let draft = self.store.get(id).map(ExpenseDraft::from)?;
        self.editing = Some(id.clone());
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submits `draft` for the record opened with [`begin_edit`](Self::begin_edit).
    pub async fn save_edit(&mut self, draft: &ExpenseDraft) -> SyncResult<Expense> {
        let id = self.editing.clone().ok_or(SyncError::NotEditing)?;
        self.edit(&id, draft).await
    }

    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterCriteria::default());
    }

    /// Installs a freshly issued token and starts over from `Idle`.
    pub fn reauthenticate(&mut self, token: impl Into<String>) {
        self.session.set_token(token);
        self.store.clear();
        self.editing = None;
        self.recompute();
        self.state = SyncState::Idle;
        self.stable = SyncState::Idle;
    }

    /// Forgets the session and every loaded expense.
    pub fn logout(&mut self) {
        self.session.clear();
        self.criteria = FilterCriteria::default();
        self.expire();
    }

    /// A dropped operation future leaves the state in flight; go back to the
    /// last stable one before starting anything new.
    fn recover(&mut self) {
        if matches!(self.state, SyncState::Loading | SyncState::Mutating) {
            tracing::debug!("previous operation was abandoned while {:?}", self.state);
            self.state = self.stable;
        }
    }

    fn begin_mutation(&mut self) -> SyncResult<()> {
        self.recover();
        match self.state {
            SyncState::Ready => {
                self.state = SyncState::Mutating;
                Ok(())
            }
            SyncState::AuthExpired => Err(SyncError::AuthExpired),
            other => Err(SyncError::NotReady(other)),
        }
    }

    async fn finish_mutation(&mut self, change: Change) -> SyncResult<()> {
        match change {
            Change::Upsert(record) => self.store.upsert(record),
            Change::Remove(id) => {
                self.store.remove(&id);
            }
        }
        self.editing = None;

        if self.mutation_sync == MutationSync::Refetch {
            match self.client.list().await {
                Ok(records) => self.store.replace_all(records),
                Err(ClientError::Unauthenticated) => {
                    return Err(self.fail(ClientError::Unauthenticated));
                }
                Err(err) => {
                    tracing::warn!("re-fetch after mutation failed: {err}");
                    self.settle_ready();
                    return Err(SyncError::Client(err));
                }
            }
        }

        self.settle_ready();
        Ok(())
    }

    fn settle_ready(&mut self) {
        self.recompute();
        self.state = SyncState::Ready;
        self.stable = SyncState::Ready;
    }

    /// Maps a client failure onto the state machine. The store is untouched.
    fn fail(&mut self, err: ClientError) -> SyncError {
        match err {
            ClientError::Unauthenticated => {
                tracing::warn!("session expired while {:?}", self.state);
                self.session.clear();
                self.expire();
                SyncError::AuthExpired
            }
            other => {
                tracing::debug!("operation failed while {:?}: {other}", self.state);
                self.state = self.stable;
                SyncError::Client(other)
            }
        }
    }

    fn expire(&mut self) {
        self.store.clear();
        self.editing = None;
        self.recompute();
        self.state = SyncState::AuthExpired;
        self.stable = SyncState::Idle;
    }

    fn recompute(&mut self) {
        self.view = summarize(self.store.all(), &self.criteria);
    }
}
