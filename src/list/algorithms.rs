use crate::chain::Chain;
use crate::list::AdaptiveList;
use crate::policy::Policy;
use std::hash::{Hash, Hasher};

/// Two lists are equal when they hold equal values in the same order. Policy
/// state such as access counts is not compared.
impl<T: PartialEq, P: Policy> PartialEq for AdaptiveList<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq, P: Policy> Eq for AdaptiveList<T, P> {}

/// Cloning keeps both the order and the per-node policy state, so a cloned
/// [`CountList`](crate::CountList) goes on reorganizing exactly like the
/// original.
impl<T: Clone, P: Policy> Clone for AdaptiveList<T, P>
where
    P::Meta: Clone,
{
    fn clone(&self) -> Self {
        let mut chain = Chain::new();
        for entry in self.entries() {
            chain.push_back(entry.clone());
        }
        Self {
            chain,
            policy: self.policy.clone(),
        }
    }
}

impl<T: Hash, P: Policy> Hash for AdaptiveList<T, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}
