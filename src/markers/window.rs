// Spawn window: the bounded set of live marker groups.
//
// Ordered oldest-first. Groups are only ever appended at the tail and removed
// from the head, and spawning walks the candidates forward, so the head is
// always the group furthest behind the observer.

use std::collections::VecDeque;

use glam::Vec3;

use super::collaborators::InstanceFactory;
use super::config::MAX_CAPACITY;
use super::error::InvariantViolation;
use super::scheduler::HazardOutcome;

/// Visual instances spawned for one candidate.
///
/// Owns its instance handles; [`MarkerGroup::release`] is the only way they
/// are given back to the factory.
#[derive(Debug)]
pub struct MarkerGroup<H> {
    candidate_index: usize,
    anchor: Vec3,
    instances: Vec<H>,
    hazard: HazardOutcome,
}

impl<H> MarkerGroup<H> {
    pub fn new(candidate_index: usize, anchor: Vec3, instances: Vec<H>, hazard: HazardOutcome) -> Self {
        Self {
            candidate_index,
            anchor,
            instances,
            hazard,
        }
    }

    pub fn candidate_index(&self) -> usize {
        self.candidate_index
    }

    /// The candidate position the group was spawned at.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn instances(&self) -> &[H] {
        &self.instances
    }

    /// What happened when a hazard was considered for this group.
    pub fn hazard(&self) -> &HazardOutcome {
        &self.hazard
    }

    /// Destroy every instance in the group. Returns how many were destroyed.
    pub fn release<F>(self, factory: &mut F) -> usize
    where
        F: InstanceFactory<Handle = H>,
    {
        let count = self.instances.len();
        for handle in self.instances {
            factory.destroy(handle);
        }
        count
    }
}

/// Bounded FIFO of marker groups, at most one per candidate index.
#[derive(Debug)]
pub struct SpawnWindow<H> {
    groups: VecDeque<MarkerGroup<H>>,
    capacity: usize,
}

impl<H> SpawnWindow<H> {
    pub fn new(capacity: usize) -> Self {
        Self {
            groups: VecDeque::with_capacity(capacity.min(MAX_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.groups.len() >= self.capacity
    }

    /// Head of the window: the group furthest behind along the path.
    pub fn oldest(&self) -> Option<&MarkerGroup<H>> {
        self.groups.front()
    }

    pub fn contains(&self, candidate_index: usize) -> bool {
        self.groups.iter().any(|g| g.candidate_index == candidate_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerGroup<H>> {
        self.groups.iter()
    }

    /// Candidate indices of live groups, oldest first.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().map(|g| g.candidate_index)
    }

    /// Append a group at the tail.
    pub fn push(&mut self, group: MarkerGroup<H>) -> Result<(), InvariantViolation> {
        if self.is_full() {
            return Err(InvariantViolation::WindowOverflow { capacity: self.capacity });
        }
        if self.contains(group.candidate_index) {
            return Err(InvariantViolation::DuplicateCandidate(group.candidate_index));
        }
        self.groups.push_back(group);
        Ok(())
    }

    /// Remove the head group. The caller is responsible for releasing it.
    pub fn pop_oldest(&mut self) -> Result<MarkerGroup<H>, InvariantViolation> {
        self.groups.pop_front().ok_or(InvariantViolation::EvictFromEmptyWindow)
    }

    /// Remove every group, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = MarkerGroup<H>> + '_ {
        self.groups.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::testing::RecordingFactory;
    use crate::markers::PrefabKind;

    fn group(index: usize) -> MarkerGroup<u32> {
        MarkerGroup::new(index, Vec3::ZERO, vec![], HazardOutcome::Disabled)
    }

    #[test]
    fn fifo_order() {
        let mut window = SpawnWindow::new(3);
        window.push(group(4)).unwrap();
        window.push(group(7)).unwrap();
        assert_eq!(window.oldest().unwrap().candidate_index(), 4);
        assert_eq!(window.iter().last().unwrap().candidate_index(), 7);

        let popped = window.pop_oldest().unwrap();
        assert_eq!(popped.candidate_index(), 4);
        assert_eq!(window.indices().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let window = SpawnWindow::<u32>::new(usize::MAX);
        assert_eq!(window.capacity(), usize::MAX);
        assert!(window.is_empty());
        assert!(!window.is_full());
    }

    #[test]
    fn rejects_overflow() {
        let mut window = SpawnWindow::new(1);
        window.push(group(0)).unwrap();
        assert_eq!(
            window.push(group(1)),
            Err(InvariantViolation::WindowOverflow { capacity: 1 })
        );
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn rejects_duplicate_candidate() {
        let mut window = SpawnWindow::new(3);
        window.push(group(2)).unwrap();
        assert_eq!(window.push(group(2)), Err(InvariantViolation::DuplicateCandidate(2)));
    }

    #[test]
    fn evicting_from_empty_window_is_a_violation() {
        let mut window: SpawnWindow<u32> = SpawnWindow::new(2);
        assert_eq!(
            window.pop_oldest().unwrap_err(),
            InvariantViolation::EvictFromEmptyWindow
        );
    }

    #[test]
    fn release_destroys_every_instance() {
        let mut factory = RecordingFactory::new(false);
        let handles = vec![
            factory.instantiate(PrefabKind::Guide),
            factory.instantiate(PrefabKind::Guide),
        ];
        let group = MarkerGroup::new(0, Vec3::ZERO, handles, HazardOutcome::Disabled);

        assert_eq!(group.release(&mut factory), 2);
        assert_eq!(factory.live_count(), 0);
        assert_eq!(factory.destroyed.len(), 2);
    }
}
