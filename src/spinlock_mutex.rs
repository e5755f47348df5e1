use std::sync::atomic::{AtomicBool, Ordering};
use std::cell::UnsafeCell;

/// A spin lock that hands out exclusive access through a closure.
pub struct Mutex<T> {
    locked: AtomicBool,
    v: UnsafeCell<T>
}

impl<T> Mutex<T> {
    pub const fn new(t: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            v: UnsafeCell::new(t)
        }
    }

    /// Spins until the lock is free, then runs `f` with exclusive access.
    pub fn with_lock<F, R>(&self, f: F) -> R where F: FnOnce(&mut T) -> R {
        while self.locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // wait on a plain load so contended cores don't keep stealing the cache line
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
                std::thread::yield_now();
            }
        }

        // we flipped `locked` to true, so we hold the lock until `run_locked` releases it
        self.run_locked(f)
    }

    /// Runs `f` only if the lock is free right now.
    pub fn try_with_lock<F, R>(&self, f: F) -> Option<R> where F: FnOnce(&mut T) -> R {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;
        Some(self.run_locked(f))
    }

    fn run_locked<F, R>(&self, f: F) -> R where F: FnOnce(&mut T) -> R {
        // releases the lock even if `f` panics
        struct Unlock<'a>(&'a AtomicBool);
        impl Drop for Unlock<'_> {
            fn drop(&mut self) {
                self.0.store(false, Ordering::Release);
            }
        }

        let _unlock = Unlock(&self.locked);
        // SAFETY: the caller holds the lock, so nobody else has a reference to the `T`
        f(unsafe { &mut *self.v.get() })
    }

    pub fn get_mut(&mut self) -> &mut T {
        // exclusive access to the whole mutex means nobody can hold the lock
        self.v.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.v.into_inner()
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Mutex::new(T::default())
    }
}

unsafe impl<T> Sync for Mutex<T> where T: Send {}
