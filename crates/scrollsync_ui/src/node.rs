//! Deferred node acquisition
//!
//! Host elements exist before they have a size. A [`DeferredNode`] remembers
//! the latest candidate element and only publishes it once an acceptance
//! predicate passes (for the widget: non-zero client height). The predicate is
//! re-run every time the candidate is set and whenever the host asks for a
//! refresh, e.g. after a resize.

/// Published state of a deferred node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState<N> {
    Unattached,
    Attached(N),
}

#[derive(Debug, Clone)]
pub struct DeferredNode<N> {
    candidate: Option<N>,
    state: NodeState<N>,
}

impl<N> Default for DeferredNode<N> {
    fn default() -> Self {
        Self {
            candidate: None,
            state: NodeState::Unattached,
        }
    }
}

impl<N: Clone + PartialEq> DeferredNode<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate element and re-evaluate. Returns true when the
    /// published node changed.
    pub fn set<F>(&mut self, candidate: Option<N>, accept: F) -> bool
    where
        F: Fn(&N) -> bool,
    {
        self.candidate = candidate;
        self.refresh(accept)
    }

    /// Re-evaluate the current candidate. Returns true when the published
    /// node changed.
    pub fn refresh<F>(&mut self, accept: F) -> bool
    where
        F: Fn(&N) -> bool,
    {
        let next = match &self.candidate {
            Some(node) if accept(node) => NodeState::Attached(node.clone()),
            _ => NodeState::Unattached,
        };
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    /// Drop the candidate and the published node.
    pub fn clear(&mut self) -> bool {
        self.candidate = None;
        let changed = self.state != NodeState::Unattached;
        self.state = NodeState::Unattached;
        changed
    }

    pub fn get(&self) -> Option<&N> {
        match &self.state {
            NodeState::Attached(node) => Some(node),
            NodeState::Unattached => None,
        }
    }

    pub fn state(&self) -> &NodeState<N> {
        &self.state
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, NodeState::Attached(_))
    }
}
