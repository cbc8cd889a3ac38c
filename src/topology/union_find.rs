//! Disjoint-set forest with directional union.
//!
//! `union(i, j)` always hangs `i`'s root under `j`'s root. The chain stitcher
//! depends on this: it unions `(successor, current)` for every matched link,
//! so the root of a linear component is the component's first curve.
//! A rank- or size-balanced union would group identically but could pick a
//! different root.

/// Disjoint-set structure over `0..len`.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<Option<usize>>,
}

impl UnionFind {
    /// `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: vec![None; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of `i`'s set, compressing the path on the way.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while let Some(p) = self.parent[root] {
            root = p;
        }
        let mut node = i;
        while let Some(p) = self.parent[node] {
            if p != root {
                self.parent[node] = Some(root);
            }
            node = p;
        }
        root
    }

    /// Merge the sets of `i` and `j` under `j`'s root; returns the surviving root.
    pub fn union(&mut self, i: usize, j: usize) -> usize {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i != root_j {
            self.parent[root_i] = Some(root_j);
            root_j
        } else {
            root_i
        }
    }

    /// Group every element by root, roots ordered by their smallest member.
    ///
    /// Members of each group are ascending.
    pub fn components(&mut self) -> Vec<(usize, Vec<usize>)> {
        let mut slot_of_root: hashbrown::HashMap<usize, usize> = hashbrown::HashMap::new();
        let mut out: Vec<(usize, Vec<usize>)> = Vec::new();
        for i in 0..self.len() {
            let root = self.find(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                out.push((root, Vec::new()));
                out.len() - 1
            });
            out[slot].1.push(i);
        }
        out
    }
}
