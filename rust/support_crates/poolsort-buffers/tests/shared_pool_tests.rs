use std::sync::Arc;

use poolsort_buffers::{BufferPool, PoolConfig, PooledBuffer, PooledVec, SharedPool};

#[test]
fn test_rent_release_round_trip() {
    let pool = Arc::new(SharedPool::<u32>::new());
    for len in [1usize, 15, 16, 17, 100, 4096] {
        let buf = PooledBuffer::rent_in(len, pool.clone(), false);
        assert_eq!(buf.len(), len);
        assert!(buf.capacity() >= len);
        assert!(buf.capacity().is_power_of_two());
        buf.release();
    }
    let stats = pool.stats();
    assert_eq!(stats.rents, 6);
    assert_eq!(stats.recycles, 6);
    assert_eq!(stats.outstanding(), 0);
    assert_eq!(stats.discards, 0);
    // 1, 15 and 16 share the smallest bucket, so a single block serves them all.
    assert_eq!(stats.allocations, 4);
    assert_eq!(stats.retained, 4);
}

#[test]
fn test_buffers_return_storage_on_panic() {
    let pool = Arc::new(SharedPool::<u64>::new());
    let pool_for_task = pool.clone();
    let result = std::panic::catch_unwind(move || {
        let mut buf = PooledBuffer::rent_in(32, pool_for_task, false);
        buf[0] = 1;
        panic!("failure while the buffer is rented");
    });
    assert!(result.is_err());
    let stats = pool.stats();
    assert_eq!(stats.outstanding(), 0);
    assert_eq!(stats.retained, 1);
}

#[test]
fn test_concurrent_rent_and_recycle() {
    let config = PoolConfig::default().with_max_retained_per_bucket(4);
    let pool = Arc::new(SharedPool::<u64>::with_config(config).unwrap());
    let num_threads = 8;
    let mut handles = Vec::new();

    for t in 0..num_threads {
        let pool = pool.clone();
        handles.push(std::thread::spawn(move || {
            fastrand::seed(9173 + t as u64);
            let mut checksum = 0u64;
            for _ in 0..200 {
                let len = fastrand::usize(1..300);
                let mut buf = PooledBuffer::rent_in(len, pool.clone(), true);
                for (i, slot) in buf.iter_mut().enumerate() {
                    *slot = i as u64;
                }
                checksum += buf.iter().sum::<u64>();

                let mut grow = PooledVec::new_in(pool.clone(), false);
                grow.extend(0..len as u64);
                assert_eq!(grow.len(), len);
            }
            checksum
        }));
    }

    let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert!(total > 0);

    let stats = pool.stats();
    assert_eq!(stats.outstanding(), 0);
    assert!(stats.retained <= 4 * config.bucket_count());
}

#[test]
fn test_custom_pool_through_trait_object() {
    let pool: Arc<dyn BufferPool<i16>> = Arc::new(SharedPool::<i16>::new());
    let storage = pool.rent(40);
    assert_eq!(storage.len(), 64);
    pool.recycle(storage, false);

    let mut v = PooledVec::new_in(pool.clone(), false);
    v.extend_from_slice(&[3, 2, 1]);
    assert_eq!(v.as_slice(), &[3, 2, 1]);
}
