use crate::engine;
use crate::models::{Alert, AlertStatus, FilterCriteria};
use crate::repository::{InMemoryRepository, Repository, RepositoryError};

/// Session-wide alert collection. Queries run against a read-only snapshot.
#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    repo: InMemoryRepository<Alert>,
}

impl AlertStore {
    pub fn new(alerts: impl IntoIterator<Item = Alert>) -> Self {
        Self {
            repo: InMemoryRepository::from_items(alerts),
        }
    }

    pub fn repo(&self) -> &InMemoryRepository<Alert> {
        &self.repo
    }

    pub fn snapshot(&self) -> Vec<Alert> {
        self.repo.list().to_vec()
    }

    pub fn query(&self, criteria: &FilterCriteria) -> Vec<Alert> {
        engine::filter_alerts(self.repo.list(), criteria)
    }

    pub fn next_id(&self) -> i64 {
        self.repo.list().iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    pub fn insert(&mut self, alert: Alert) -> Result<(), RepositoryError> {
        self.repo.add(alert)
    }

    pub fn change_status(
        &mut self,
        id: i64,
        status: AlertStatus,
        comment: Option<&str>,
    ) -> Result<&Alert, RepositoryError> {
        let alert = self
            .repo
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        alert.change_status(status, comment);
        Ok(alert)
    }
}
