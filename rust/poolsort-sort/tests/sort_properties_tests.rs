use std::cmp::Ordering;

use poolsort_buffers::{PooledBuffer, PooledVec, SharedPool};
use poolsort_sort::{
    ByKey, NaturalOrder, SortAlgorithm, SortExt, counting_sort, counting_sort_with_domain,
    insertion_sort, is_sorted_by, par_merge_sort, quick_sort, radix_sort, sort_range_by,
    tim_sort,
};

fn random_range(len: usize) -> (usize, usize) {
    let index = fastrand::usize(..=len);
    let length = fastrand::usize(..=len - index);
    (index, length)
}

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut v = values.to_vec();
    v.sort();
    v
}

#[test]
fn test_sorts_keep_frame_and_permutation() {
    fastrand::seed(0x5EED);
    for algorithm in SortAlgorithm::ALL {
        for _ in 0..40 {
            let len = fastrand::usize(0..400);
            let before: Vec<i64> = (0..len).map(|_| fastrand::i64(-500..500)).collect();
            let (index, length) = random_range(len);
            let mut v = before.clone();
            sort_range_by(algorithm, &mut v, index, length, NaturalOrder).unwrap();

            assert_eq!(v[..index], before[..index], "{algorithm:?}");
            assert_eq!(v[index + length..], before[index + length..], "{algorithm:?}");
            assert_eq!(
                v[index..index + length],
                sorted_copy(&before[index..index + length])[..],
                "{algorithm:?}"
            );

            let once = v.clone();
            sort_range_by(algorithm, &mut v, index, length, NaturalOrder).unwrap();
            assert_eq!(v, once, "{algorithm:?} is not idempotent");
        }
    }
}

#[test]
fn test_stable_algorithms_keep_tie_order() {
    fastrand::seed(0xCAFE);
    let by_key = ByKey(|e: &(u16, usize)| e.0);
    for algorithm in SortAlgorithm::ALL.into_iter().filter(|a| a.is_stable()) {
        for len in [3usize, 40, 1000] {
            let mut v: Vec<(u16, usize)> = (0..len).map(|i| (fastrand::u16(..6), i)).collect();
            sort_range_by(algorithm, &mut v, 0, len, by_key).unwrap();
            assert!(v.windows(2).all(|w| w[0] < w[1]), "{algorithm:?}");
        }
    }

    let mut v: Vec<(u16, usize)> = (0..20_000).map(|i| (fastrand::u16(..6), i)).collect();
    par_merge_sort(&mut v, 0, 20_000, by_key).unwrap();
    assert!(v.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_reported_scenarios() {
    let mut v = vec![5, 3, 8, 1, 9, 2];
    quick_sort(&mut v, 0, 6, NaturalOrder).unwrap();
    assert_eq!(v, [1, 2, 3, 5, 8, 9]);

    let mut v = vec![4, 1, 4, 2, 1];
    counting_sort_with_domain(&mut v, 0, 5, 1, 4, false).unwrap();
    assert_eq!(v, [1, 1, 2, 4, 4]);
    counting_sort_with_domain(&mut v, 0, 5, 1, 4, true).unwrap();
    assert_eq!(v, [4, 4, 2, 1, 1]);

    let mut v = vec![-5, 3, -1, 0, 2];
    radix_sort(&mut v, 0, 5).unwrap();
    assert_eq!(v, [-5, -1, 0, 2, 3]);

    fastrand::seed(33);
    let input: Vec<u32> = (0..33).map(|_| fastrand::u32(..10)).collect();
    let mut by_tim = input.clone();
    let mut by_insertion = input;
    tim_sort(&mut by_tim, 0, 33, NaturalOrder).unwrap();
    insertion_sort(&mut by_insertion, 0, 33, NaturalOrder).unwrap();
    assert_eq!(by_tim, by_insertion);

    let mut v = vec![3, 2, 1];
    for algorithm in SortAlgorithm::ALL {
        sort_range_by(algorithm, &mut v, 2, 0, NaturalOrder).unwrap();
        assert_eq!(v, [3, 2, 1]);
    }
    counting_sort(&mut v, 2, 0, false).unwrap();
    radix_sort(&mut v, 2, 0).unwrap();
    assert_eq!(v, [3, 2, 1]);
}

#[test]
fn test_invalid_ranges_never_mutate() {
    let mut v = vec![3, 1, 2];
    for algorithm in SortAlgorithm::ALL {
        let err = sort_range_by(algorithm, &mut v, 1, 3, NaturalOrder).unwrap_err();
        assert!(err.is_index_out_of_range());
        let err = sort_range_by(algorithm, &mut v, usize::MAX, 2, NaturalOrder).unwrap_err();
        assert!(err.is_index_out_of_range());
    }
    assert!(counting_sort(&mut v, 0, 4, false).is_err());
    assert!(radix_sort(&mut v, 4, 0).is_err());
    assert_eq!(v, [3, 1, 2]);
}

#[test]
fn test_integer_sorts_match_comparison_sorts() {
    fastrand::seed(0xD1CE);
    for _ in 0..30 {
        let len = fastrand::usize(0..600);
        let before: Vec<i64> = (0..len).map(|_| fastrand::i64(-100_000..100_000)).collect();
        let (index, length) = random_range(len);

        let mut by_radix = before.clone();
        radix_sort(&mut by_radix, index, length).unwrap();
        let mut by_counting = before.clone();
        counting_sort(&mut by_counting, index, length, false).unwrap();
        let mut by_quick = before.clone();
        quick_sort(&mut by_quick, index, length, NaturalOrder).unwrap();

        assert_eq!(by_radix, by_quick);
        assert_eq!(by_counting, by_quick);
    }
}

#[test]
fn test_pooled_buffers_sort_in_place() {
    let mut buf = PooledBuffer::<i32>::rent(6);
    buf.copy_from_slice(0, &[6, 5, 4, 3, 2, 1]).unwrap();
    buf.sort_with(SortAlgorithm::Merge).unwrap();
    assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5, 6]);

    let mut v = PooledVec::<i32>::new();
    v.extend_from_slice(&[2, 9, 4]);
    radix_sort(&mut v, 0, 3).unwrap();
    assert_eq!(v.as_slice(), &[2, 4, 9]);
    let descending = |a: &i32, b: &i32| -> Ordering { b.cmp(a) };
    v.sort_range_by(SortAlgorithm::Intro, 0, 3, descending).unwrap();
    assert!(is_sorted_by(&v, 0, 3, descending).unwrap());
}

#[test]
fn test_scratch_returns_to_shared_pool() {
    // `u128` is used by no other test, so the shared pool's counters are ours alone.
    let pool = SharedPool::<u128>::shared();
    let before = pool.stats();
    fastrand::seed(12);
    let mut v: Vec<u128> = (0..5000).map(|_| fastrand::u128(..)).collect();
    sort_range_by(SortAlgorithm::Merge, &mut v, 0, 5000, NaturalOrder).unwrap();
    sort_range_by(SortAlgorithm::Tim, &mut v, 0, 5000, NaturalOrder).unwrap();
    par_merge_sort(&mut v, 0, 5000, NaturalOrder).unwrap();
    assert!(v.windows(2).all(|w| w[0] <= w[1]));

    let after = pool.stats();
    assert_eq!(after.rents - before.rents, 3);
    assert_eq!(after.outstanding(), 0);
}

#[test]
fn test_inconsistent_comparator_stays_in_bounds() {
    fastrand::seed(0xBAD);
    let coin = |_: &u32, _: &u32| -> Ordering {
        match fastrand::u8(..3) {
            0 => Ordering::Less,
            1 => Ordering::Equal,
            _ => Ordering::Greater,
        }
    };
    for algorithm in SortAlgorithm::ALL {
        let before: Vec<u32> = (0..500).collect();
        let mut v = before.clone();
        sort_range_by(algorithm, &mut v, 0, 500, coin).unwrap();
        v.sort();
        assert_eq!(v, before, "{algorithm:?} lost or duplicated elements");
    }
}
