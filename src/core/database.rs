//! Linked in-memory database of NEOs and their close approaches.
//!
//! [`NeoDatabase`] takes ownership of the unlinked collections produced by
//! the loaders, resolves every approach's foreign-key designation in a single
//! pass, and is read-only afterwards. Objects and approaches live in two
//! arenas and refer to each other through [`NeoId`] / [`ApproachId`], so the
//! back-reference is resolved against the database at access time through
//! [`ApproachView`].

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;

use crate::core::filter::AttributeFilter;
use crate::core::model::{ApproachId, CloseApproach, NearEarthObject, NeoId};
use crate::util::error::{NeoError, Result};

/// What to do with close approaches whose designation matches no NEO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Keep the approach with no linked NEO; only logged at debug level.
    Allow,
    /// Keep the approach with no linked NEO and log a warning summary.
    #[default]
    Warn,
    /// Refuse to build the database.
    Reject,
}

/// A database of near-Earth objects and their close approaches.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    unresolved: usize,
}

impl NeoDatabase {
    /// Link `neos` and `approaches` with the default [`LinkPolicy`].
    ///
    /// Never fails: approaches referencing an unknown designation keep a
    /// `None` NEO reference.
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Self {
        let db = Self::link(neos, approaches);
        db.log_unresolved(LinkPolicy::default());
        db
    }

    /// Link `neos` and `approaches`, handling unresolved designations
    /// according to `policy`.
    ///
    /// # Errors
    /// Returns [`NeoError::UnresolvedDesignation`] under
    /// [`LinkPolicy::Reject`] if any approach stays unlinked.
    pub fn with_policy(
        neos: Vec<NearEarthObject>,
        approaches: Vec<CloseApproach>,
        policy: LinkPolicy,
    ) -> Result<Self> {
        let db = Self::link(neos, approaches);
        if policy == LinkPolicy::Reject {
            if let Some(first) = db.first_unresolved() {
                return Err(NeoError::UnresolvedDesignation {
                    count: db.unresolved,
                    first: first.designation.clone(),
                });
            }
        }
        db.log_unresolved(policy);
        Ok(db)
    }

    /// Build both lookup indexes and link every approach in one pass.
    ///
    /// Input is expected unlinked with unique designations; duplicates are
    /// not rejected and the first occurrence wins in the indexes.
    fn link(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();
        for (idx, neo) in neos.iter().enumerate() {
            by_designation
                .entry(neo.designation.clone())
                .or_insert(NeoId(idx));
            if let Some(name) = &neo.name {
                by_name.entry(name.clone()).or_insert(NeoId(idx));
            }
        }

        let mut unresolved = 0;
        for (idx, approach) in approaches.iter_mut().enumerate() {
            match by_designation.get(&approach.designation) {
                Some(&neo_id) => {
                    approach.neo = Some(neo_id);
                    neos[neo_id.0].approaches.push(ApproachId(idx));
                }
                None => {
                    approach.neo = None;
                    unresolved += 1;
                }
            }
        }

        tracing::info!(
            "Linked {} close approaches to {} NEOs ({} unresolved)",
            approaches.len() - unresolved,
            neos.len(),
            unresolved
        );

        Self {
            neos,
            approaches,
            by_designation,
            by_name,
            unresolved,
        }
    }

    fn first_unresolved(&self) -> Option<&CloseApproach> {
        self.approaches.iter().find(|a| a.neo.is_none())
    }

    fn log_unresolved(&self, policy: LinkPolicy) {
        let Some(first) = self.first_unresolved() else {
            return;
        };
        match policy {
            LinkPolicy::Allow => tracing::debug!(
                "{} close approaches reference unknown NEOs (first: '{}')",
                self.unresolved,
                first.designation
            ),
            LinkPolicy::Warn | LinkPolicy::Reject => tracing::warn!(
                "{} close approaches reference unknown NEOs (first: '{}')",
                self.unresolved,
                first.designation
            ),
        }
    }

    /// Find a NEO by its primary designation.
    ///
    /// Matching is exact and case-sensitive. Returns `None` on a miss.
    pub fn get_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|id| &self.neos[id.0])
    }

    /// Find a NEO by its IAU name.
    ///
    /// Matching is exact and case-sensitive. The empty string never matches,
    /// since unnamed objects carry no name at all.
    pub fn get_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        if name.is_empty() {
            return None;
        }
        self.by_name.get(name).map(|id| &self.neos[id.0])
    }

    /// Look up a NEO by its arena index.
    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    /// Look up a close approach by its arena index.
    pub fn approach(&self, id: ApproachId) -> Option<ApproachView<'_>> {
        self.approaches.get(id.0).map(|approach| ApproachView {
            db: self,
            id,
            approach,
        })
    }

    /// All NEOs in storage order.
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All close approaches in storage order.
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// The close approaches linked to `neo`, in link order.
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = ApproachView<'a>> + 'a {
        neo.approaches.iter().filter_map(|&id| self.approach(id))
    }

    /// Number of close approaches whose designation matched no NEO.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }

    /// Number of stored close approaches.
    pub fn len(&self) -> usize {
        self.approaches.len()
    }

    /// Whether the database holds no close approaches.
    pub fn is_empty(&self) -> bool {
        self.approaches.is_empty()
    }

    /// Lazily yield the close approaches that pass **all** `filters`.
    ///
    /// Approaches come out in storage order, which is not guaranteed to be
    /// chronological. An empty filter slice yields every approach. If a
    /// filter fails to evaluate, the error is yielded once and the iterator
    /// then ends.
    pub fn query<'a>(&'a self, filters: &'a [AttributeFilter]) -> Query<'a> {
        tracing::debug!("Querying {} approaches with {} filters", self.len(), filters.len());
        Query {
            db: self,
            filters,
            next: 0,
            done: false,
        }
    }
}

/// A close approach borrowed together with the database that owns it, so
/// its linked NEO can be resolved.
#[derive(Clone, Copy)]
pub struct ApproachView<'a> {
    db: &'a NeoDatabase,
    id: ApproachId,
    approach: &'a CloseApproach,
}

impl<'a> ApproachView<'a> {
    /// Arena index of this approach.
    pub fn id(&self) -> ApproachId {
        self.id
    }

    /// The underlying approach record.
    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    /// The linked NEO, or `None` if the designation did not resolve.
    pub fn neo(&self) -> Option<&'a NearEarthObject> {
        self.approach.neo.and_then(|id| self.db.neo(id))
    }

    /// The NEO's full name when linked, otherwise the raw designation.
    pub fn fullname(&self) -> String {
        match self.neo() {
            Some(neo) => neo.fullname(),
            None => self.approach.designation.clone(),
        }
    }
}

impl Deref for ApproachView<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &CloseApproach {
        self.approach
    }
}

impl fmt::Debug for ApproachView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApproachView")
            .field("id", &self.id)
            .field("approach", self.approach)
            .field("neo", &self.neo())
            .finish()
    }
}

impl fmt::Display for ApproachView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.fullname(),
            self.distance,
            self.velocity
        )
    }
}

/// Lazy iterator returned by [`NeoDatabase::query`].
pub struct Query<'a> {
    db: &'a NeoDatabase,
    filters: &'a [AttributeFilter],
    next: usize,
    done: bool,
}

impl<'a> Query<'a> {
    fn matches(&self, view: &ApproachView<'a>) -> Result<bool> {
        for filter in self.filters {
            if !filter.evaluate(view)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<'a> Iterator for Query<'a> {
    type Item = Result<ApproachView<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some(approach) = self.db.approaches.get(self.next) {
            let view = ApproachView {
                db: self.db,
                id: ApproachId(self.next),
                approach,
            };
            self.next += 1;
            match self.matches(&view) {
                Ok(true) => return Some(Ok(view)),
                Ok(false) => continue,
                Err(e) => {
                    tracing::debug!("Query aborted at approach {}: {e}", view.id.0);
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.db.approaches.len() - self.next))
        }
    }
}

impl FusedIterator for Query<'_> {}
