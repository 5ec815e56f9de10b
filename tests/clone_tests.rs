use chunklist::ChunkList;

fn contents(list: &ChunkList<u32, 4>) -> Vec<u32> {
    (0..list.len()).map(|i| list[i]).collect()
}

#[test]
fn test_clone_has_same_sequence() {
    let mut original: ChunkList<u32, 4> = ChunkList::new();
    for v in 0..25 {
        original.push_back(v);
    }

    let copy = original.clone();

    assert_eq!(copy.len(), original.len());
    assert_eq!(contents(&copy), contents(&original));
}

#[test]
fn test_mutating_the_clone_leaves_the_original_unchanged() {
    let mut original: ChunkList<u32, 4> = ChunkList::new();
    for v in 0..10 {
        original.push_back(v);
    }
    let snapshot = contents(&original);

    let mut copy = original.clone();
    copy.push_back(100);
    copy.remove(0).unwrap();
    *copy.get_mut(3).unwrap() = 999;

    assert_eq!(original.len(), 10);
    assert_eq!(contents(&original), snapshot);
}

#[test]
fn test_mutating_the_original_leaves_the_clone_unchanged() {
    let mut original: ChunkList<u32, 4> = ChunkList::new();
    for v in 0..10 {
        original.push_back(v);
    }

    let copy = original.clone();
    let snapshot = contents(&copy);

    original.clear();
    original.push_back(42);

    assert_eq!(copy.len(), 10);
    assert_eq!(contents(&copy), snapshot);
}

#[test]
fn test_clone_of_empty_list() {
    let original: ChunkList<u32, 4> = ChunkList::new();
    let mut copy = original.clone();

    assert!(copy.is_empty());
    copy.push_back(1);
    assert_eq!(copy.len(), 1);
    assert!(original.is_empty());
}

#[test]
fn test_default_is_empty() {
    let list: ChunkList<u32, 4> = ChunkList::default();
    assert!(list.is_empty());
    assert_eq!(list.node_count(), 0);
}
