use tracing::warn;

use crate::repository::{Entity, Repository, RepositoryError};

#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository; later duplicates of a key are dropped with a warning.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut repo = Self::new();
        for item in items {
            if let Err(e) = repo.add(item) {
                warn!("Dropping seed record: {}", e);
            }
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.items.iter_mut().find(|i| &i.key() == key)
    }

    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|i| &i.key() == key)
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|i| &i.key() == key)
    }

    fn list(&self) -> &[T] {
        &self.items
    }

    fn add(&mut self, item: T) -> Result<(), RepositoryError> {
        let key = item.key();
        if self.position(&key).is_some() {
            return Err(RepositoryError::Duplicate(key.to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    fn update(&mut self, item: T) -> Result<(), RepositoryError> {
        let key = item.key();
        match self.position(&key) {
            Some(idx) => {
                self.items[idx] = item;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(key.to_string())),
        }
    }

    fn delete(&mut self, key: &T::Key) -> Result<T, RepositoryError> {
        match self.position(key) {
            Some(idx) => Ok(self.items.remove(idx)),
            None => Err(RepositoryError::NotFound(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Vehicle, VehicleStatus};

    fn vehicle(id: &str, plate: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            plate: plate.to_string(),
            brand: Some("Renault".into()),
            model: None,
            status: VehicleStatus::Active,
        }
    }

    #[test]
    fn test_crud_cycle() {
        let mut repo = InMemoryRepository::new();
        repo.add(vehicle("V-1", "12345-A-6")).unwrap();
        repo.add(vehicle("V-2", "777-B-1")).unwrap();
        assert_eq!(repo.len(), 2);

        let mut v = repo.get(&"V-1".to_string()).cloned().unwrap();
        v.status = VehicleStatus::Maintenance;
        repo.update(v).unwrap();
        assert_eq!(repo.get(&"V-1".to_string()).unwrap().status, VehicleStatus::Maintenance);

        let removed = repo.delete(&"V-1".to_string()).unwrap();
        assert_eq!(removed.plate, "12345-A-6");
        assert_eq!(repo.list().len(), 1);
        assert_eq!(repo.list()[0].id, "V-2");
    }

    #[test]
    fn test_duplicate_and_missing_keys() {
        let mut repo = InMemoryRepository::from_items([vehicle("V-1", "a"), vehicle("V-1", "b")]);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].plate, "a");

        assert_eq!(
            repo.add(vehicle("V-1", "c")),
            Err(RepositoryError::Duplicate("V-1".into()))
        );
        assert_eq!(
            repo.update(vehicle("V-9", "c")),
            Err(RepositoryError::NotFound("V-9".into()))
        );
        assert!(repo.delete(&"V-9".to_string()).is_err());
    }
}
