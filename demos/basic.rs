//! Basic pool usage: sequential reuse, oversized fallback, shared pool.
//!
//! Run with:
//!     cargo run --example basic

use std::sync::Arc;
use std::thread;

use shardbuf::{Pool, PoolConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = Arc::new(Pool::new(
        PoolConfig::new(4 * 1024)?.with_max_retries(2),
    )?);

    println!("Shard size: {} bytes\n", pool.shard_size());

    // Short-lived buffers cycle through the same shard
    for i in 0..1000usize {
        let mut buf = pool.make(100 + i % 200);
        buf.clear();
        buf[..5].copy_from_slice(b"hello");
        buf.done();
    }
    println!("After 1000 sequential buffers: {:?}", pool.stats());

    // Requests at or above the shard size bypass the shards
    let big = pool.make(64 * 1024);
    println!("64 KiB buffer pooled: {}", big.is_pooled());
    big.done();

    // The pool is shared across threads
    let workers: Vec<_> = (0..4u8)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    let mut buf = pool.make(32);
                    buf.fill(t);
                    buf.done();
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().map_err(|_| "worker panicked")?;
    }

    let stats = pool.stats();
    println!("\nAfter 40000 concurrent buffers: {:?}", stats);
    println!(
        "Shards created: {}, idle now: {}",
        stats.shards_created,
        pool.idle_shards()
    );

    Ok(())
}
