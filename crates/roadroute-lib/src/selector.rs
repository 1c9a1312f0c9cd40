use rand::seq::index;
use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::junction::JunctionSet;

/// Draw two distinct junctions uniformly without replacement.
///
/// Fails with [`Error::InsufficientJunctions`] instead of retrying when the
/// set has fewer than two members.
pub fn select_pair<R>(junctions: &JunctionSet, rng: &mut R) -> Result<(NodeId, NodeId)>
where
    R: Rng + ?Sized,
{
    let ids = junctions.ids();
    if ids.len() < 2 {
        return Err(Error::InsufficientJunctions { found: ids.len() });
    }

    let picked = index::sample(rng, ids.len(), 2);
    Ok((ids[picked.index(0)], ids[picked.index(1)]))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geo::Coordinate;
    use crate::graph::GraphStore;

    fn isolated(count: i64) -> JunctionSet {
        let mut builder = GraphStore::builder();
        for id in 0..count {
            builder
                .add_node(id, Coordinate::new(0.0, id as f64 * 0.001))
                .unwrap();
        }
        JunctionSet::classify(&builder.build())
    }

    #[test]
    fn never_returns_the_same_node_twice() {
        let junctions = isolated(2);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let (start, goal) = select_pair(&junctions, &mut rng).unwrap();
            assert_ne!(start, goal);
        }
    }

    #[test]
    fn covers_every_junction() {
        let junctions = isolated(5);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let (start, goal) = select_pair(&junctions, &mut rng).unwrap();
            seen.insert(start);
            seen.insert(goal);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn same_seed_same_pairs() {
        let junctions = isolated(10);
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(
                select_pair(&junctions, &mut a).unwrap(),
                select_pair(&junctions, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn single_junction_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            select_pair(&isolated(1), &mut rng),
            Err(Error::InsufficientJunctions { found: 1 })
        ));
        assert!(matches!(
            select_pair(&isolated(0), &mut rng),
            Err(Error::InsufficientJunctions { found: 0 })
        ));
    }
}
