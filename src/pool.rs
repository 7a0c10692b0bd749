use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::trace;

/// A bounded, thread-safe free list of reusable [`Vec`] buffers.
///
/// Taking a buffer from an empty pool allocates a new one, and returning a
/// buffer to a full pool drops it - neither operation blocks.
#[derive(Debug)]
pub(crate) struct BufferPool<E> {
    tx: Sender<Vec<E>>,
    rx: Receiver<Vec<E>>,

    /// The initial capacity of newly allocated buffers.
    buffer_capacity: usize,

    /// The number of buffers allocated because the pool was empty.
    allocations: AtomicUsize,
}

impl<E> BufferPool<E> {
    pub(crate) fn new(pool_capacity: usize, buffer_capacity: usize) -> Self {
        let (tx, rx) = bounded(pool_capacity);
        Self {
            tx,
            rx,
            buffer_capacity,
            allocations: AtomicUsize::new(0),
        }
    }

    /// Return an empty [`Stack`] that draws its buffer from this pool.
    pub(crate) fn stack(&self) -> Stack<'_, E> {
        Stack {
            buf: None,
            pool: self,
        }
    }

    pub(crate) fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    /// The number of idle buffers currently held.
    #[cfg(test)]
    pub(crate) fn idle(&self) -> usize {
        self.rx.len()
    }

    fn take(&self) -> Vec<E> {
        if let Ok(buf) = self.rx.try_recv() {
            return buf;
        }

        let n = self.allocations.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(
            "buffer pool empty, allocating buffer {n} with capacity {}",
            self.buffer_capacity
        );

        Vec::with_capacity(self.buffer_capacity)
    }

    fn put(&self, mut buf: Vec<E>) {
        buf.clear();

        // A full (or zero-sized) pool drops the buffer.
        let _ = self.tx.try_send(buf);
    }
}

/// A LIFO stack backed by a buffer borrowed from a [`BufferPool`].
///
/// The buffer is taken from the pool on the first push, and handed back once
/// the stack is popped empty or dropped.
#[derive(Debug)]
pub(crate) struct Stack<'a, E> {
    buf: Option<Vec<E>>,
    pool: &'a BufferPool<E>,
}

impl<E> Stack<'_, E> {
    pub(crate) fn push(&mut self, v: E) {
        self.buf.get_or_insert_with(|| self.pool.take()).push(v);
    }

    pub(crate) fn pop(&mut self) -> Option<E> {
        let buf = self.buf.as_mut()?;
        let v = buf.pop();

        if buf.is_empty() {
            if let Some(buf) = self.buf.take() {
                self.pool.put(buf);
            }
        }

        v
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.as_ref().map(Vec::len).unwrap_or_default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Drop for Stack<'_, E> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.put(buf);
        }
    }
}
