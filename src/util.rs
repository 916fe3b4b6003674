use rustc_hash::FxHashMap;

/// Groups vertices by their component identifier.
///
/// Components are ordered by their smallest vertex and vertices ascend within
/// each component, so two partitions compare equal regardless of the ids used.
pub fn components_from_ids(scc_id: &[usize]) -> Vec<Vec<usize>> {
    let mut slot_of_id = FxHashMap::<usize, usize>::default();
    let mut components = Vec::<Vec<usize>>::new();
    for (vertex, &id) in scc_id.iter().enumerate() {
        let slot = *slot_of_id.entry(id).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(vertex);
    }
    components
}

/// Whether two id assignments induce the same partition of the vertices.
///
/// Holds exactly when the ids of `left` and `right` are in one-to-one
/// correspondence vertex by vertex.
pub fn same_partition(left: &[usize], right: &[usize]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut forward = FxHashMap::<usize, usize>::default();
    let mut backward = FxHashMap::<usize, usize>::default();
    left.iter().zip(right).all(|(&l, &r)| {
        *forward.entry(l).or_insert(r) == r && *backward.entry(r).or_insert(l) == l
    })
}

#[cfg(test)]
mod test_util {
    use super::*;

    #[test]
    fn test_components_from_ids() {
        assert_eq!(
            components_from_ids(&[5, 2, 5, 9, 2]),
            vec![vec![0, 2], vec![1, 4], vec![3]]
        );
        assert!(components_from_ids(&[]).is_empty());
    }

    #[test]
    fn test_same_partition() {
        assert!(same_partition(&[0, 0, 1], &[7, 7, 3]));
        assert!(!same_partition(&[0, 0, 1], &[7, 3, 3]));
        assert!(!same_partition(&[0, 1, 2], &[4, 4, 2]));
        assert!(!same_partition(&[0, 0], &[0, 0, 0]));
        assert!(same_partition(&[], &[]));
    }
}
