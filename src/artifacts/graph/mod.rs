//! Commit graph traversal and common-ancestor search
//!
//! Commits only know their parents, so every walk goes from child to parent.
//! Records are loaded lazily through a caller-supplied loader and kept in an
//! arena keyed by commit id, so each record is read at most once per graph.
//!
//! ## Ancestor walk
//!
//! [`CommitGraph::ancestors`] yields the start commit followed by all of its
//! ancestors, breadth-first with a seen-set. A diamond-shaped history yields
//! the shared ancestor once; the resulting set is the same as a depth-first
//! walk that repeats it.
//!
//! ## Common ancestor
//!
//! [`CommitGraph::common_ancestor`] intersects the ancestor sets of two
//! commits and, among the candidates, picks the one with the latest recorded
//! timestamp. This is a timestamp heuristic, not a graph-distance minimum.
//! Timestamps have one-second resolution, so ties are broken by ancestor
//! count: a descendant always has strictly more ancestors than any of its
//! own ancestors.

use crate::artifacts::errors::Result;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::commit_id::CommitId;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

pub struct CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&CommitId) -> Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
    arena: RefCell<HashMap<CommitId, SlimCommit>>,
}

impl<CommitLoaderFn> CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&CommitId) -> Result<SlimCommit>,
{
    /// # Example
    ///
    /// ```rust,ignore
    /// let graph = CommitGraph::new(|id| database.load_slim_commit(id));
    /// let base = graph.common_ancestor(&head, &other)?;
    /// ```
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            arena: RefCell::new(HashMap::new()),
        }
    }

    /// Load a commit through the arena
    pub fn commit(&self, id: &CommitId) -> Result<SlimCommit> {
        if let Some(commit) = self.arena.borrow().get(id) {
            return Ok(commit.clone());
        }

        let commit = (self.commit_loader)(id)?;
        self.arena.borrow_mut().insert(id.clone(), commit.clone());

        Ok(commit)
    }

    /// Lazy, finite walk over `start` and every commit reachable from it
    pub fn ancestors(&self, start: &CommitId) -> Ancestors<'_, CommitLoaderFn> {
        Ancestors {
            graph: self,
            worklist: VecDeque::from([start.clone()]),
            seen: HashSet::from([start.clone()]),
        }
    }

    pub fn ancestor_set(&self, start: &CommitId) -> Result<HashSet<CommitId>> {
        self.ancestors(start).collect()
    }

    /// The most recent commit reachable from both `left` and `right`
    ///
    /// Returns `None` when the histories share no commit.
    pub fn common_ancestor(&self, left: &CommitId, right: &CommitId) -> Result<Option<CommitId>> {
        let left_ancestors = self.ancestor_set(left)?;
        let right_ancestors = self.ancestor_set(right)?;

        let candidates = left_ancestors
            .intersection(&right_ancestors)
            .cloned()
            .collect::<Vec<_>>();

        tracing::debug!(
            left = %left,
            right = %right,
            candidates = candidates.len(),
            "searching common ancestor"
        );

        let mut latest = Vec::new();
        let mut latest_timestamp = None;
        for candidate in candidates {
            let timestamp = self.commit(&candidate)?.timestamp;
            match latest_timestamp {
                Some(best) if timestamp < best => {}
                Some(best) if timestamp == best => latest.push(candidate),
                _ => {
                    latest_timestamp = Some(timestamp);
                    latest = vec![candidate];
                }
            }
        }

        if latest.len() < 2 {
            return Ok(latest.pop());
        }

        // ancestor sets are only walked for candidates sharing the latest second
        let mut best: Option<(usize, CommitId)> = None;
        for candidate in latest {
            let key = (self.ancestor_set(&candidate)?.len(), candidate);
            if best.as_ref().is_none_or(|best| key > *best) {
                best = Some(key);
            }
        }

        Ok(best.map(|(_, id)| id))
    }
}

/// Iterator returned by [`CommitGraph::ancestors`]
pub struct Ancestors<'g, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&CommitId) -> Result<SlimCommit>,
{
    graph: &'g CommitGraph<CommitLoaderFn>,
    worklist: VecDeque<CommitId>,
    seen: HashSet<CommitId>,
}

impl<CommitLoaderFn> Iterator for Ancestors<'_, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&CommitId) -> Result<SlimCommit>,
{
    type Item = Result<CommitId>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.worklist.pop_front()?;

        match self.graph.commit(&current) {
            Ok(commit) => {
                for parent in commit.parents {
                    if self.seen.insert(parent.clone()) {
                        self.worklist.push_back(parent);
                    }
                }
                Some(Ok(current))
            }
            Err(err) => {
                // a broken record ends the walk
                self.worklist.clear();
                Some(Err(err))
            }
        }
    }
}
