use crate::areas::repository::Repository;
use crate::artifacts::compare::deep_compare;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::commit_id::CommitId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(CommitId),
    /// Staging matches the HEAD snapshot; nothing was written
    Unchanged,
}

impl Repository {
    pub fn commit(&mut self, message: &str) -> Result<CommitOutcome> {
        self.require_repository()?;
        let _lock = self.lock()?;

        self.write_commit(message, None)
    }

    /// Snapshot the staging area as a child of HEAD (and of `merged`, if any)
    ///
    /// The caller holds the repository lock.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        merged: Option<&CommitId>,
    ) -> Result<CommitOutcome> {
        let refs = self.refs();
        let head = refs.read_head()?;
        let active = refs.active_branch()?;

        // decided before anything moves
        let active_follows_head = match &active {
            Some(branch) => refs
                .find_branch(branch.as_ref())?
                .is_some_and(|entry| entry.target == head),
            None => false,
        };

        if let Some(head) = &head
            && self.staging_matches(head)?
        {
            tracing::info!(head = %head, "staging unchanged, no commit written");
            return Ok(CommitOutcome::Unchanged);
        }

        let id = CommitId::generate();
        let parents = head.iter().chain(merged).cloned().collect::<Vec<_>>();
        let record = CommitRecord::new(
            parents,
            self.config().commit_date_or_now(),
            message.to_string(),
        );
        self.database()
            .store(&id, &record, self.staging().path())?;

        let master = refs.read_master()?;
        let master = match &active {
            Some(branch) if branch.is_default_branch() && active_follows_head => Some(&id),
            _ => master.as_ref(),
        };
        refs.set_head_and_master(Some(&id), master)?;

        if let Some(branch) = &active
            && !branch.is_default_branch()
            && active_follows_head
        {
            refs.update_branch(branch, &id)?;
        }

        let is_root = if head.is_none() { "(root-commit) " } else { "" };
        self.emit(format!(
            "[{}{}] {}",
            is_root,
            id.to_short_id(),
            record.short_message()
        ))?;

        Ok(CommitOutcome::Created(id))
    }

    fn staging_matches(&self, head: &CommitId) -> Result<bool> {
        let comparison = deep_compare(
            &self.database().snapshot_path(head),
            self.staging().path(),
            &[],
            self.config().compare_policy,
        )?;

        Ok(comparison.equal)
    }
}
