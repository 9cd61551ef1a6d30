/*!
# Union-Find

A disjoint-set forest over dense nodes with union by rank and path compression.
Both `find` and `union` run in amortized (inverse Ackermann) constant time.

Used by [`Kruskal`](super::Kruskal) and by cycle detection in undirected graphs.
*/

use super::*;

/// Disjoint-set forest over the elements `0..len`
///
/// # Examples
/// ```
/// use wgraphs::algo::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// assert!(uf.union(0, 1));
/// assert!(uf.union(2, 3));
/// assert!(!uf.union(1, 0));
/// assert!(uf.same_set(0, 1));
/// assert!(!uf.same_set(1, 2));
/// assert_eq!(uf.number_of_sets(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<Node>,
    rank: Vec<u8>,
    num_sets: NumNodes,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, ..., {n - 1}`
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
            num_sets: n,
        }
    }

    /// Adds a new singleton set and returns its element
    pub fn make_set(&mut self) -> Node {
        let x = self.parent.len() as Node;
        self.parent.push(x);
        self.rank.push(0);
        self.num_sets += 1;
        x
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `x` and compresses the path to it.
    /// ** Panics if `x >= len` **
    pub fn find(&mut self, x: Node) -> Node {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut current = x;
        while self.parent[current as usize] != root {
            let next = self.parent[current as usize];
            self.parent[current as usize] = root;
            current = next;
        }

        root
    }

    /// Merges the sets of `x` and `y`.
    /// Returns *false* if both were already in the same set.
    pub fn union(&mut self, x: Node, y: Node) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }

        let (ux, uy) = (rx as usize, ry as usize);
        match self.rank[ux].cmp(&self.rank[uy]) {
            std::cmp::Ordering::Less => self.parent[ux] = ry,
            std::cmp::Ordering::Greater => self.parent[uy] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[uy] = rx;
                self.rank[ux] += 1;
            }
        }

        self.num_sets -= 1;
        true
    }

    /// Returns *true* if `x` and `y` belong to the same set
    pub fn same_set(&mut self, x: Node, y: Node) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.num_sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn singletons() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.number_of_sets(), 5);
        for x in 0..5 {
            assert_eq!(uf.find(x), x);
        }
        assert_eq!(uf.make_set(), 5);
        assert_eq!(uf.len(), 6);
        assert_eq!(uf.number_of_sets(), 6);
    }

    #[test]
    fn find_compresses_paths() {
        let mut uf = UnionFind::new(8);
        for x in 1..8 {
            uf.union(x - 1, x);
        }
        assert_eq!(uf.number_of_sets(), 1);

        let root = uf.find(7);
        for x in 0..8 {
            uf.find(x);
            assert_eq!(uf.parent[x as usize], root);
        }
    }

    #[test]
    fn union_by_rank_keeps_trees_flat() {
        let mut uf = UnionFind::new(1 << 10);
        for step in 0..10 {
            let stride = 1 << step;
            for x in (0..(1 << 10)).step_by(2 * stride) {
                uf.union(x, x + stride as Node);
            }
        }
        assert_eq!(uf.number_of_sets(), 1);
        assert!(uf.rank.iter().all(|&r| r <= 10));
    }

    #[test]
    fn agrees_with_naive_labels() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x5eed);
        let n = 50;

        for _ in 0..20 {
            let mut uf = UnionFind::new(n);
            let mut label: Vec<Node> = (0..n).collect();

            for _ in 0..40 {
                let x = rng.random_range(0..n);
                let y = rng.random_range(0..n);

                let merged = uf.union(x, y);
                let (lx, ly) = (label[x as usize], label[y as usize]);
                assert_eq!(merged, lx != ly);
                for l in label.iter_mut().filter(|l| **l == ly) {
                    *l = lx;
                }
            }

            for x in 0..n {
                for y in 0..n {
                    assert_eq!(uf.same_set(x, y), label[x as usize] == label[y as usize]);
                }
            }
        }
    }
}
