use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::registry::{MutableId, MutableRegistry, RegistryInner, Syncable};

struct MutableState<T> {
    committed: T,
    pending: T,
    dirty: bool,
}

/// A dirty-tracking cell.
///
/// Reads see the last committed value; writes are staged and only become
/// visible after [`Mutable::sync`]. Within one pass of a tree every reader
/// therefore sees the snapshot from before that pass's writes.
pub struct Mutable<T> {
    id: MutableId,
    state: RefCell<MutableState<T>>,
    registry: Rc<RegistryInner>,
}

impl<T> Mutable<T>
where
    T: Clone + PartialEq + 'static,
{
    /// Create a cell and register it with `registry`. It deregisters itself on drop.
    pub fn new(registry: &MutableRegistry, initial: T) -> Rc<Self> {
        let inner = Rc::clone(registry.inner());
        Rc::new_cyclic(move |weak: &Weak<Self>| {
            let slot: Weak<dyn Syncable> = weak.clone();
            let id = inner.add(slot);
            Self {
                id,
                state: RefCell::new(MutableState {
                    committed: initial.clone(),
                    pending: initial,
                    dirty: false,
                }),
                registry: inner,
            }
        })
    }

    pub fn id(&self) -> MutableId {
        self.id
    }

    /// Stage `value`. Only a value different from the currently staged one marks the cell dirty.
    pub fn set(&self, value: T) {
        let mut state = self.state.borrow_mut();
        if state.pending == value {
            return;
        }
        state.pending = value;
        state.dirty = true;
    }

    pub fn get(&self) -> T {
        self.state.borrow().committed.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow().committed)
    }

    /// The staged value, i.e. what the next sync will commit.
    pub fn pending(&self) -> T {
        self.state.borrow().pending.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.borrow().dirty
    }

    /// Commit the staged value; returns whether the cell was dirty.
    pub fn sync(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.committed = state.pending.clone();
        core::mem::replace(&mut state.dirty, false)
    }
}

impl<T> Syncable for Mutable<T>
where
    T: Clone + PartialEq + 'static,
{
    fn sync(&self) -> bool {
        Mutable::sync(self)
    }
}

impl<T> Drop for Mutable<T> {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Mutable")
            .field("id", &self.id)
            .field("committed", &state.committed)
            .field("pending", &state.pending)
            .field("dirty", &state.dirty)
            .finish()
    }
}

/// Shared handle to a [`Mutable`]. Handles may alias the same cell; the cell
/// lives until the last handle is dropped.
pub struct Mutator<T> {
    cell: Rc<Mutable<T>>,
}

impl<T> Mutator<T>
where
    T: Clone + PartialEq + 'static,
{
    pub fn new(cell: Rc<Mutable<T>>) -> Self {
        Self { cell }
    }

    pub fn id(&self) -> MutableId {
        self.cell.id()
    }

    pub fn set(&self, value: T) {
        self.cell.set(value);
    }

    pub fn get(&self) -> T {
        self.cell.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.cell.with(f)
    }

    pub fn pending(&self) -> T {
        self.cell.pending()
    }

    pub fn is_dirty(&self) -> bool {
        self.cell.is_dirty()
    }

    pub fn sync(&self) -> bool {
        self.cell.sync()
    }

    pub fn ptr_eq(&self, other: &Mutator<T>) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T> Clone for Mutator<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mutator").field(&*self.cell).finish()
    }
}
