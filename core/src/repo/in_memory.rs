use std::collections::HashMap;

use super::Repo;
use crate::{
    object::{Id, Object},
    refs::{self, RefTarget},
    Error, Result,
};

/// A `Repo` that keeps everything in memory. Counts object writes so
/// tests can observe whether a `put` actually stored anything.
#[derive(Debug, Default)]
pub(crate) struct MemoryRepo {
    objects: HashMap<Id, Object>,
    refs: HashMap<String, RefTarget>,
    pub object_writes: usize,
}

impl MemoryRepo {
    pub fn new() -> MemoryRepo {
        let mut repo = MemoryRepo::default();
        repo.refs.insert(
            refs::HEAD.to_string(),
            RefTarget::Symbolic("refs/heads/main".to_string()),
        );
        repo
    }
}

impl Repo for MemoryRepo {
    fn put_object(&mut self, object: &Object) -> Result<()> {
        if !self.objects.contains_key(object.id()) {
            self.objects.insert(*object.id(), object.clone());
            self.object_writes += 1;
        }
        Ok(())
    }

    fn get_object(&self, id: &Id) -> Result<Object> {
        self.objects
            .get(id)
            .cloned()
            .ok_or(Error::ObjectNotFound(*id))
    }

    fn exists(&self, id: &Id) -> Result<bool> {
        Ok(self.objects.contains_key(id))
    }

    fn read_ref(&self, name: &str) -> Result<Option<RefTarget>> {
        refs::check_name(name)?;
        Ok(self.refs.get(name).cloned())
    }

    fn write_ref(&mut self, name: &str, target: &RefTarget) -> Result<()> {
        refs::check_name(name)?;
        self.refs.insert(name.to_string(), target.clone());
        Ok(())
    }
}
