use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Receive buffers are sized for the largest UDP payload a client may send.
pub const RECV_BUFFER_SIZE: usize = 65_535;

/// Pool of fixed-size receive buffers.
///
/// A buffer is lent out for one socket read and handed back when the
/// [`PooledBuffer`] guard drops, so no buffer is ever shared by two reads.
pub struct BufferPool {
    buffers: Mutex<Vec<Vec<u8>>>,
    buffer_size: usize,
    max_pooled: usize,
    total_created: AtomicU64,
    total_reused: AtomicU64,
}

impl BufferPool {
    pub fn new(buffer_size: usize, max_pooled: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::with_capacity(max_pooled)),
            buffer_size,
            max_pooled,
            total_created: AtomicU64::new(0),
            total_reused: AtomicU64::new(0),
        }
    }

    /// Takes a buffer from the pool or allocates a new one.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let pooled = self
            .buffers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop();

        let buf = match pooled {
            Some(buf) => {
                self.total_reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => {
                self.total_created.fetch_add(1, Ordering::Relaxed);
                vec![0u8; self.buffer_size]
            }
        };

        PooledBuffer {
            buf: Some(buf),
            pool: self,
        }
    }

    fn release(&self, buf: Vec<u8>) {
        let mut buffers = self.buffers.lock().unwrap_or_else(|e| e.into_inner());
        if buffers.len() < self.max_pooled {
            buffers.push(buf);
        } else {
            debug!(pooled = buffers.len(), "Buffer pool full, dropping buffer");
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_created: self.total_created.load(Ordering::Relaxed),
            total_reused: self.total_reused.load(Ordering::Relaxed),
            total_pooled: self.buffers.lock().unwrap_or_else(|e| e.into_inner()).len(),
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(RECV_BUFFER_SIZE, 64)
    }
}

/// Buffer on loan from a [`BufferPool`]; returned to it on drop.
pub struct PooledBuffer<'a> {
    buf: Option<Vec<u8>>,
    pool: &'a BufferPool,
}

impl PooledBuffer<'_> {
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.buf.as_deref_mut().unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_deref().unwrap_or_default()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    pub total_created: u64,
    pub total_reused: u64,
    pub total_pooled: usize,
}
