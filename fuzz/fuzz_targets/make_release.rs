#![no_main]

use libfuzzer_sys::fuzz_target;
use shardbuf::{Buffer, Pool, PoolConfig};

fuzz_target!(|data: Vec<u8>| {
    if data.len() < 2 {
        return;
    }

    let shard_size = 1 + data[0] as usize;
    let retries = (data[1] % 8) as usize;
    let pool = Pool::new(PoolConfig::new(shard_size).unwrap().with_max_retries(retries)).unwrap();

    let mut live: Vec<(u8, Buffer)> = Vec::new();

    for (i, &byte) in data[2..].iter().enumerate() {
        if byte & 1 == 0 {
            // Make: even bytes request `byte / 2` (may exceed shard_size)
            let n = (byte / 2) as usize;
            let mut buf = pool.make(n);
            assert_eq!(buf.len(), n);
            assert_eq!(buf.is_pooled(), n != 0 && n < shard_size);

            let tag = i as u8;
            buf.fill(tag);
            live.push((tag, buf));
        } else if !live.is_empty() {
            // Release: odd bytes pick a live buffer
            let (tag, mut buf) = live.swap_remove(byte as usize % live.len());
            assert!(buf.iter().all(|&b| b == tag));
            buf.release();
            buf.release();
            assert!(buf.is_empty());
        }
    }

    // Verify: no live buffer was overwritten by a later one
    for (tag, buf) in &live {
        assert!(buf.iter().all(|b| b == tag));
    }
});
