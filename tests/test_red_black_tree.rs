use rand::Rng;
use redblack_collections::red_black_tree::{Color, NodeId, RedBlackTree};
use simplelog::{Config, LevelFilter, TestLogger};
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 20_000;
const KEYS: [i32; 7] = [0, 100, 28, 4, 5, 10, 2024];

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn non_empty_tree() -> RedBlackTree {
    let mut tree = RedBlackTree::new();
    for key in &KEYS {
        tree.insert(*key);
    }
    tree
}

// Number of black nodes from `id` up to and including the root.
fn black_nodes_to_root(tree: &RedBlackTree, id: NodeId) -> usize {
    let mut count = 0;
    let mut curr = Some(id);
    while let Some(id) = curr {
        if tree[id].color() == Color::Black {
            count += 1;
        }
        curr = tree[id].parent();
    }
    count
}

fn assert_axioms(tree: &RedBlackTree) {
    if let Some(root) = tree.root() {
        assert_eq!(tree[root].color(), Color::Black);
        assert_eq!(tree[root].parent(), None);
    }

    // Every empty child position is black, so a path through a leaf node crosses the same black
    // nodes as the paths through its two empty children.
    let leaves = tree.leaves();
    if let Some(first) = leaves.first() {
        let expected = black_nodes_to_root(tree, *first);
        for leaf in &leaves {
            assert_eq!(black_nodes_to_root(tree, *leaf), expected);
            assert_eq!(tree.color_of(tree[*leaf].left()), Color::Black);
            assert_eq!(tree.color_of(tree[*leaf].right()), Color::Black);
        }
        for node in tree.internal_nodes() {
            if tree[node].left().is_none() || tree[node].right().is_none() {
                assert_eq!(black_nodes_to_root(tree, node), expected);
            }
        }
    }

    for node in tree.internal_nodes() {
        if tree[node].color() == Color::Red {
            assert_eq!(tree.color_of(tree[node].left()), Color::Black);
            assert_eq!(tree.color_of(tree[node].right()), Color::Black);
        }
        for child in tree[node].left().into_iter().chain(tree[node].right()) {
            assert_eq!(tree[child].parent(), Some(node));
        }
    }

    assert!(tree.black_height().is_some());
}

#[test]
fn empty_tree_insert() {
    let mut tree = RedBlackTree::new();
    let (inserted, node) = tree.insert(28);
    assert!(inserted);
    assert_eq!(tree[node].key(), 28);

    let (inserted, node) = tree.insert(0);
    assert!(inserted);
    assert_eq!(tree[node].key(), 0);
}

#[test]
fn empty_tree_delete() {
    let mut tree = RedBlackTree::new();
    assert!(!tree.delete(1));
    assert!(tree.is_empty());
}

#[test]
fn empty_tree_find() {
    let mut tree = RedBlackTree::new();
    assert_eq!(tree.root(), None);
    assert_eq!(tree.find(28), None);

    tree.insert(28);
    let node = tree.find(28).unwrap();
    assert_eq!(tree[node].key(), 28);
    assert_eq!(tree.find(1), None);
}

#[test]
fn non_empty_tree_insert() {
    let mut tree = non_empty_tree();
    let (inserted, node) = tree.insert(19);
    assert!(inserted);
    assert_eq!(tree[node].key(), 19);
    assert_eq!(tree.len(), KEYS.len() + 1);
}

#[test]
fn non_empty_tree_insert_duplicate() {
    let mut tree = non_empty_tree();
    let existing = tree.find(28).unwrap();
    let before: Vec<i32> = tree.iter().collect();

    assert_eq!(tree.insert(28), (false, existing));
    assert_eq!(tree.iter().collect::<Vec<i32>>(), before);
    assert_axioms(&tree);
}

#[test]
fn non_empty_tree_delete() {
    init_logger();
    let mut tree = non_empty_tree();
    assert!(tree.delete(28));
    assert_eq!(tree.find(28), None);
    assert!(!tree.delete(28));
    assert!(!tree.delete(1));
    assert_eq!(tree.len(), KEYS.len() - 1);
    assert_axioms(&tree);
}

#[test]
fn non_empty_tree_find() {
    let tree = non_empty_tree();
    for key in &KEYS {
        let node = tree.find(*key).unwrap();
        assert_eq!(tree[node].key(), *key);
    }
    assert_eq!(tree.find(1), None);
}

#[test]
fn axiom_leaf_positions_are_black() {
    let tree = non_empty_tree();
    let leaves = tree.leaves();
    assert!(!leaves.is_empty());
    for leaf in leaves {
        assert_eq!(tree.color_of(tree[leaf].left()), Color::Black);
        assert_eq!(tree.color_of(tree[leaf].right()), Color::Black);
    }
}

#[test]
fn axiom_red_nodes_have_black_children() {
    let tree = non_empty_tree();
    for node in tree.internal_nodes() {
        if tree[node].color() == Color::Red {
            assert_eq!(tree.color_of(tree[node].left()), Color::Black);
            assert_eq!(tree.color_of(tree[node].right()), Color::Black);
        }
    }
}

#[test]
fn axiom_uniform_black_height() {
    let tree = non_empty_tree();
    let leaves = tree.leaves();
    let expected = black_nodes_to_root(&tree, leaves[0]);
    for leaf in leaves {
        assert_eq!(black_nodes_to_root(&tree, leaf), expected);
    }
    assert_axioms(&tree);
}

#[test]
fn in_order_traversal_is_ascending() {
    let tree = non_empty_tree();
    let mut expected = KEYS.to_vec();
    expected.sort();
    assert_eq!(tree.iter().collect::<Vec<i32>>(), expected);
    assert_eq!(tree.min(), Some(0));
    assert_eq!(tree.max(), Some(2024));
}

#[test]
fn delete_every_key() {
    let mut tree = non_empty_tree();
    for key in &KEYS {
        assert!(tree.delete(*key));
        assert!(!tree.contains(*key));
        assert_axioms(&tree);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.black_height(), Some(0));
}

#[test]
fn random_operations_match_btreeset() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = RedBlackTree::new();
    let mut expected = BTreeSet::new();

    for i in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(-1000, 1000);
        if rng.gen_range(0, 3) == 0 {
            assert_eq!(tree.delete(key), expected.remove(&key));
        } else {
            let (inserted, node) = tree.insert(key);
            assert_eq!(inserted, expected.insert(key));
            assert_eq!(tree[node].key(), key);
        }

        if i % 500 == 0 {
            assert_axioms(&tree);
        }
    }

    assert_axioms(&tree);
    assert_eq!(tree.len(), expected.len());
    assert_eq!(
        tree.iter().collect::<Vec<i32>>(),
        expected.iter().cloned().collect::<Vec<i32>>(),
    );
    for key in -1000..1000 {
        assert_eq!(tree.contains(key), expected.contains(&key));
    }

    tree.clear();
    assert!(tree.is_empty());
    assert_axioms(&tree);
}
