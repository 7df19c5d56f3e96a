//! Splay tree implementation
//!
//! Self-adjusting binary search tree. Every `insert` and `search` splays the
//! requested key, or the last node on its search path, to the root. No balance
//! metadata is stored.

use std::cmp::Ordering;
use std::fmt;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// Node in the splay tree, exclusively owned by its parent link
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Splay tree keyed by `K`, usable as an unbounded adaptive cache
pub struct SplayTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> SplayTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key currently at the root, if any
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_ref().map(|node| &node.key)
    }

    /// Length of the longest root-to-leaf path (0 for an empty tree)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// In-order iterator over `(key, value)` pairs. Does not splay.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Remove every node
    pub fn clear(&mut self) {
        // Unlink iteratively so a degenerate (chain-shaped) tree cannot
        // overflow the stack through recursive Box drops.
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Insert a key-value pair, leaving the key at the root
    ///
    /// # Arguments
    /// * `key` - Key to insert
    /// * `value` - Value stored under `key`
    ///
    /// # Returns
    /// * `bool` - `false` if the key was already present. The stored value
    ///   is kept and `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let Some(root) = self.root.take() else {
            self.root = Some(Node::new(key, value));
            self.len = 1;
            return true;
        };

        let mut root = splay(root, &key);
        let node = match key.cmp(&root.key) {
            Ordering::Equal => {
                self.root = Some(root);
                return false;
            }
            Ordering::Less => {
                let mut node = Node::new(key, value);
                node.left = root.left.take();
                node.right = Some(root);
                node
            }
            Ordering::Greater => {
                let mut node = Node::new(key, value);
                node.right = root.right.take();
                node.left = Some(root);
                node
            }
        };

        self.root = Some(node);
        self.len += 1;
        true
    }

    /// Look up a key, splaying it (or its nearest neighbour) to the root
    ///
    /// The root changes even when the key is absent.
    pub fn search(&mut self, key: &K) -> Option<&V> {
        let root = self.root.take()?;
        let root = self.root.insert(splay(root, key));
        if root.key == *key {
            Some(&root.value)
        } else {
            None
        }
    }

    /// Look up a key without restructuring the tree
    pub fn peek(&self, key: &K) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Check if a key is present without restructuring the tree
    pub fn contains(&self, key: &K) -> bool {
        self.peek(key).is_some()
    }
}

/// Which child of a node the search descended into
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Where the key sits relative to the child on the search path
#[derive(Clone, Copy, PartialEq, Eq)]
enum Turn {
    /// Key is the child itself
    Found,
    /// Continue on the same side (zig-zig)
    Outer,
    /// Continue on the opposite side (zig-zag)
    Inner,
}

/// A node and the child it was detached from on the way down
struct Frame<K, V> {
    node: Box<Node<K, V>>,
    child: Box<Node<K, V>>,
    side: Side,
    turn: Turn,
}

/// Bring `key`, or the last node on its search path, to the top of `node`'s subtree
///
/// Walks down two levels at a time, detaching each node and its child into
/// `path`, then rebuilds bottom-up with the zig-zig / zig-zag rotations. The
/// path lives on the heap, so a degenerate tree cannot exhaust the stack.
fn splay<K: Ord, V>(mut node: Box<Node<K, V>>, key: &K) -> Box<Node<K, V>> {
    let mut path: Vec<Frame<K, V>> = Vec::new();

    let mut splayed = loop {
        let side = match key.cmp(&node.key) {
            Ordering::Equal => break node,
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
        };

        let taken = match side {
            Side::Left => node.left.take(),
            Side::Right => node.right.take(),
        };
        let Some(mut child) = taken else {
            break node;
        };

        let turn = match (side, key.cmp(&child.key)) {
            (_, Ordering::Equal) => Turn::Found,
            (Side::Left, Ordering::Less) | (Side::Right, Ordering::Greater) => Turn::Outer,
            _ => Turn::Inner,
        };

        let grandchild = match (side, turn) {
            (_, Turn::Found) => None,
            (Side::Left, Turn::Outer) | (Side::Right, Turn::Inner) => child.left.take(),
            (Side::Left, Turn::Inner) | (Side::Right, Turn::Outer) => child.right.take(),
        };

        let frame = Frame {
            node,
            child,
            side,
            turn,
        };
        match grandchild {
            Some(next) => {
                path.push(frame);
                node = next;
            }
            None => break reassemble(frame, None),
        }
    };

    while let Some(frame) = path.pop() {
        splayed = reassemble(frame, Some(splayed));
    }
    splayed
}

/// Reattach the splayed grandchild subtree under `frame` and rotate
fn reassemble<K, V>(frame: Frame<K, V>, splayed: Link<K, V>) -> Box<Node<K, V>> {
    let Frame {
        mut node,
        mut child,
        side,
        turn,
    } = frame;

    match side {
        Side::Left => {
            match turn {
                Turn::Outer => {
                    // Zig-zig
                    child.left = splayed;
                    node.left = Some(child);
                    node = rotate_right(node);
                }
                Turn::Inner => {
                    // Zig-zag
                    child.right = splayed;
                    if child.right.is_some() {
                        child = rotate_left(child);
                    }
                    node.left = Some(child);
                }
                Turn::Found => node.left = Some(child),
            }

            if node.left.is_some() {
                rotate_right(node)
            } else {
                node
            }
        }
        Side::Right => {
            match turn {
                Turn::Outer => {
                    // Zag-zag
                    child.right = splayed;
                    node.right = Some(child);
                    node = rotate_left(node);
                }
                Turn::Inner => {
                    // Zag-zig
                    child.left = splayed;
                    if child.left.is_some() {
                        child = rotate_right(child);
                    }
                    node.right = Some(child);
                }
                Turn::Found => node.right = Some(child),
            }

            if node.right.is_some() {
                rotate_left(node)
            } else {
                node
            }
        }
    }
}

/// Promote the left child. No-op without one.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.left.take() {
        Some(mut left) => {
            node.left = left.right.take();
            left.right = Some(node);
            left
        }
        None => node,
    }
}

/// Promote the right child. No-op without one.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.right.take() {
        Some(mut right) => {
            node.right = right.left.take();
            right.left = Some(node);
            right
        }
        None => node,
    }
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for SplayTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SplayTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for SplayTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a SplayTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`SplayTree`]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn keys_of<K: Clone, V>(tree: &SplayTree<K, V>) -> Vec<K> {
        tree.keys().cloned().collect()
    }

    #[test]
    fn test_empty_tree() {
        let mut tree: SplayTree<i32, &str> = SplayTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.search(&1), None);
        assert_eq!(tree.root_key(), None);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_insert_and_search() {
        let mut tree = SplayTree::new();

        tree.insert(5, "five");
        tree.insert(3, "three");
        tree.insert(8, "eight");
        tree.insert(1, "one");

        assert_eq!(tree.search(&1), Some(&"one"));
        assert_eq!(tree.root_key(), Some(&1));
        assert_eq!(keys_of(&tree), vec![1, 3, 5, 8]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_insert_makes_key_root() {
        let mut tree = SplayTree::new();

        for key in [50, 20, 70, 10, 30, 60, 80] {
            tree.insert(key, key * 10);
            assert_eq!(tree.root_key(), Some(&key));
        }
        assert_eq!(keys_of(&tree), vec![10, 20, 30, 50, 60, 70, 80]);
    }

    #[test]
    fn test_duplicate_insert_keeps_first_value() {
        let mut tree = SplayTree::new();

        assert!(tree.insert(1, "a"));
        assert!(tree.insert(2, "b"));
        assert!(!tree.insert(1, "z"));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root_key(), Some(&1));
        assert_eq!(tree.search(&1), Some(&"a"));
    }

    #[test]
    fn test_search_miss_splays_nearest() {
        let mut tree: SplayTree<i32, i32> = (1..=10).map(|k| (k, k)).collect();
        assert_eq!(tree.root_key(), Some(&10));

        assert_eq!(tree.search(&0), None);
        assert_eq!(tree.root_key(), Some(&1));

        assert_eq!(tree.search(&11), None);
        assert_eq!(tree.root_key(), Some(&10));

        assert_eq!(keys_of(&tree), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_repeated_search_is_stable() {
        let mut tree: SplayTree<i32, i32> = [(4, 40), (2, 20), (6, 60), (5, 50)].into_iter().collect();

        let first = tree.search(&2).copied();
        let root_after_first = tree.root_key().copied();
        let second = tree.search(&2).copied();

        assert_eq!(first, Some(20));
        assert_eq!(first, second);
        assert_eq!(tree.root_key().copied(), root_after_first);
    }

    #[test]
    fn test_splay_shortens_degenerate_chain() {
        // Ascending inserts leave a left-leaning chain
        let mut tree: SplayTree<u32, ()> = (1..=100).map(|k| (k, ())).collect();
        assert_eq!(tree.height(), 100);

        assert_eq!(tree.search(&1), Some(&()));
        assert_eq!(tree.root_key(), Some(&1));
        assert!(tree.height() < 100);
    }

    #[test]
    fn test_peek_does_not_splay() {
        let mut tree = SplayTree::new();
        tree.insert(1, 'a');
        tree.insert(2, 'b');
        tree.insert(3, 'c');

        assert_eq!(tree.peek(&1), Some(&'a'));
        assert!(tree.contains(&2));
        assert!(!tree.contains(&4));
        assert_eq!(tree.root_key(), Some(&3));
    }

    #[test]
    fn test_clear() {
        let mut tree: SplayTree<u32, u32> = (0..10).map(|k| (k, k)).collect();
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_drop_deep_tree() {
        let tree: SplayTree<u32, u32> = (0..200_000).map(|k| (k, k)).collect();
        assert_eq!(tree.len(), 200_000);
        drop(tree);
    }

    #[test]
    fn test_search_deep_chain() {
        // Ascending inserts leave a left-leaning chain as deep as the key count
        let mut tree: SplayTree<u32, u32> = (0..200_000).map(|k| (k, k * 2)).collect();
        assert_eq!(tree.height(), 200_000);

        assert_eq!(tree.search(&0), Some(&0));
        assert_eq!(tree.root_key(), Some(&0));
        assert!(tree.height() < 200_000);

        assert_eq!(tree.search(&199_999), Some(&399_998));
        assert_eq!(tree.root_key(), Some(&199_999));

        assert_eq!(tree.search(&200_000), None);
        assert_eq!(tree.root_key(), Some(&199_999));

        assert_eq!(tree.len(), 200_000);
        assert!(tree.keys().zip(tree.keys().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn test_search_promotes_child_of_root() {
        // Ascending inserts give the chain 5 -> 3 -> 1
        let mut tree: SplayTree<i32, ()> = [1, 3, 5].into_iter().map(|k| (k, ())).collect();
        assert_eq!(tree.height(), 3);

        assert!(tree.search(&3).is_some());
        assert_eq!(tree.root_key(), Some(&3));
        assert_eq!(tree.height(), 2);

        // Miss below the far end splays 1, the last node on the path
        assert!(tree.search(&0).is_none());
        assert_eq!(tree.root_key(), Some(&1));
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 5]);
    }

    #[test]
    fn test_iter_exact_size() {
        let tree: SplayTree<u8, u8> = [(3, 0), (1, 0), (2, 0)].into_iter().collect();
        let iter = tree.iter();

        assert_eq!(iter.len(), 3);
        assert_eq!(iter.map(|(k, _)| *k).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            .. ProptestConfig::default()
        })]

        #[test]
        fn inorder_keys_strictly_increase(ops in prop::collection::vec((0u16..512, any::<u32>()), 0..200)) {
            let mut tree = SplayTree::new();
            let mut model = BTreeMap::new();
            for (key, value) in ops {
                let inserted = tree.insert(key, value);
                prop_assert_eq!(inserted, !model.contains_key(&key));
                model.entry(key).or_insert(value);
            }

            let keys = keys_of(&tree);
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(keys, model.keys().copied().collect::<Vec<_>>());
            prop_assert_eq!(tree.len(), model.len());
        }

        #[test]
        fn search_returns_first_inserted_value_at_root(ops in prop::collection::vec((0u16..256, any::<u32>()), 1..150)) {
            let mut tree = SplayTree::new();
            let mut model = BTreeMap::new();
            for (key, value) in &ops {
                tree.insert(*key, *value);
                model.entry(*key).or_insert(*value);
            }

            for (key, value) in &model {
                prop_assert_eq!(tree.search(key), Some(value));
                prop_assert_eq!(tree.root_key(), Some(key));
            }
        }

        #[test]
        fn search_preserves_key_set(
            inserts in prop::collection::vec(0i32..1000, 1..100),
            lookups in prop::collection::vec(-10i32..1010, 0..100),
        ) {
            let mut tree: SplayTree<i32, i32> = inserts.iter().map(|k| (*k, *k)).collect();
            let before = keys_of(&tree);

            for target in lookups {
                let found = tree.search(&target).copied();
                prop_assert_eq!(found, before.binary_search(&target).ok().map(|_| target));
            }

            prop_assert_eq!(keys_of(&tree), before);
        }
    }
}
