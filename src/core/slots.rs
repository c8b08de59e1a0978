use std::{
    alloc::{alloc, dealloc, handle_alloc_error, realloc, Layout},
    fmt,
    marker::PhantomData,
    mem::{align_of, size_of},
    ptr::NonNull,
};


/// An exactly sized heap buffer of `cap` slots of type `T`.
///
/// This type only manages memory: it does not know which slots are
/// initialized and never drops elements. Its owner (the
/// [`ArrayStore`][super::ArrayStore]) tracks the live prefix `0..len` and
/// is responsible for dropping it before the buffer goes away.
///
/// Unlike `Vec<T>`, reallocations are exact: after `realloc(n)` the capacity
/// is `n`, not "at least `n`". This is what makes the growth policy and
/// `compact()` of the containers predictable. A buffer with capacity 0 owns
/// no allocation at all, so all empty containers share the same (dangling)
/// "empty array".
pub(crate) struct Slots<T> {
    /// Start of the allocation. Dangling if `cap == 0` or `T` is a ZST.
    ptr: NonNull<T>,

    /// Number of slots of the allocation.
    cap: usize,

    /// Signals ownership of `T` values to the drop checker. The owner drops
    /// the live values, so from the outside this buffer owns them.
    _owns: PhantomData<T>,
}

impl<T> Slots<T> {
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _owns: PhantomData,
        }
    }

    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Reallocates the buffer to have exactly `new_cap` slots. The first
    /// `min(cap, new_cap)` slots keep their content.
    ///
    /// # Formal
    ///
    /// **Preconditions**:
    /// - all slots with index `≥ new_cap` are uninitialized (the caller
    ///   never shrinks below its live length)
    ///
    /// **Postconditons**:
    /// - `self.cap() == new_cap`
    #[inline(never)]
    #[cold]
    pub(crate) unsafe fn realloc(&mut self, new_cap: usize) {
        #[inline(never)]
        #[cold]
        fn capacity_overflow() -> ! {
            panic!("capacity overflow in `compact_collections` (attempt to allocate \
                more than `isize::MAX` bytes)");
        }

        if new_cap == self.cap {
            return;
        }

        // Shrinking to zero releases the memory and returns to the shared
        // empty state.
        if new_cap == 0 {
            self.dealloc();
            return;
        }

        // Zero sized types never need memory; only the capacity changes.
        if size_of::<T>() != 0 {
            let size = new_cap.checked_mul(size_of::<T>())
                .filter(|&size| size <= isize::MAX as usize)
                .unwrap_or_else(|| capacity_overflow());
            let new_layout = Layout::from_size_align_unchecked(size, align_of::<T>());

            let ptr = if self.cap == 0 {
                alloc(new_layout)
            } else {
                realloc(self.ptr.as_ptr() as *mut u8, self.old_layout(), size)
            };

            if ptr.is_null() {
                handle_alloc_error(new_layout);
            }

            self.ptr = NonNull::new_unchecked(ptr as *mut T);
        }

        self.cap = new_cap;
    }

    /// Releases the allocation and sets `cap` to 0.
    ///
    /// # Formal
    ///
    /// **Preconditions**:
    /// - all slots are uninitialized
    unsafe fn dealloc(&mut self) {
        if self.cap != 0 {
            if size_of::<T>() != 0 {
                dealloc(self.ptr.as_ptr() as *mut u8, self.old_layout());
            }
            self.ptr = NonNull::dangling();
            self.cap = 0;
        }
    }

    /// Returns the layout of the current allocation. `self.cap` must not be
    /// 0 and `T` must not be a ZST.
    unsafe fn old_layout(&self) -> Layout {
        // This can't overflow as it was allocated before.
        Layout::from_size_align_unchecked(self.cap * size_of::<T>(), align_of::<T>())
    }
}

impl<T> Drop for Slots<T> {
    fn drop(&mut self) {
        // The owner has already dropped all live elements.
        unsafe {
            self.dealloc();
        }
    }
}

impl<T> fmt::Debug for Slots<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Slots")
            .field("cap", &self.cap)
            .finish()
    }
}

// `NonNull` prevents the automatic impls. The buffer is uniquely owned
// and has no interior mutability, so it is as thread safe as `T` itself.
unsafe impl<T: Send> Send for Slots<T> {}
unsafe impl<T: Sync> Sync for Slots<T> {}
