use core::fmt;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::mutable::{Mutable, Mutator};

/// Identity of a registered cell. Stable for the cell's lifetime; never reused
/// within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutableId(u64);

/// Anything the registry can commit at the end of a pass.
pub trait Syncable {
    /// Commit the staged value and report whether it changed since the last commit.
    fn sync(&self) -> bool;
}

#[derive(Default)]
struct Slots {
    cells: HashMap<MutableId, Weak<dyn Syncable>>,
    /// Allocation addresses of registered cells. A registered `Weak` keeps its
    /// allocation alive, so an address cannot be reused while it is listed here.
    addrs: HashSet<*const ()>,
}

fn addr(cell: &Weak<dyn Syncable>) -> *const () {
    Weak::as_ptr(cell) as *const ()
}

pub(crate) struct RegistryInner {
    slots: RefCell<Slots>,
    next_id: Cell<u64>,
}

impl RegistryInner {
    pub(crate) fn add(&self, cell: Weak<dyn Syncable>) -> MutableId {
        let mut slots = self.slots.borrow_mut();
        assert!(
            slots.addrs.insert(addr(&cell)),
            "mutable registry: cell registered twice"
        );

        let id = MutableId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        slots.cells.insert(id, cell);
        id
    }

    pub(crate) fn remove(&self, id: MutableId) {
        let mut slots = self.slots.borrow_mut();
        let Some(cell) = slots.cells.remove(&id) else {
            panic!("mutable registry: removing unregistered cell id={}", id.0);
        };
        slots.addrs.remove(&addr(&cell));
    }
}

/// The set of live cells a tick driver commits after every pass.
///
/// The registry only holds weak references: a cell lives as long as some
/// [`Mutator`] handle does, and removes its own slot when the last handle is
/// dropped. Cloning a `MutableRegistry` yields another handle to the *same*
/// registry; identity, not value, is what matters.
#[derive(Clone)]
pub struct MutableRegistry {
    inner: Rc<RegistryInner>,
}

impl MutableRegistry {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                slots: RefCell::new(Slots::default()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub(crate) fn inner(&self) -> &Rc<RegistryInner> {
        &self.inner
    }

    /// Allocate a registered cell holding `initial` (both committed and staged).
    pub fn mutable<T>(&self, initial: T) -> Mutator<T>
    where
        T: Clone + PartialEq + 'static,
    {
        Mutator::new(Mutable::new(self, initial))
    }

    pub fn mutable_default<T>(&self) -> Mutator<T>
    where
        T: Clone + PartialEq + Default + 'static,
    {
        self.mutable(T::default())
    }

    /// Register an externally managed cell.
    ///
    /// Panics if the same cell is already registered. Cells created through
    /// [`MutableRegistry::mutable`] register themselves.
    pub fn add(&self, cell: Weak<dyn Syncable>) -> MutableId {
        self.inner.add(cell)
    }

    /// Deregister a cell. Panics if `id` is not registered.
    pub fn remove(&self, id: MutableId) {
        self.inner.remove(id)
    }

    pub fn contains(&self, id: MutableId) -> bool {
        self.inner.slots.borrow().cells.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.slots.borrow().cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &MutableRegistry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Commit every registered cell and report whether any of them changed.
    ///
    /// Every cell is synced even after one reports a change; order is unspecified.
    /// An external cell dropped without [`MutableRegistry::remove`] is skipped,
    /// and trips a debug assertion.
    pub fn sync(&self) -> bool {
        // Upgrade outside the borrow so a cell dropped afterwards can deregister.
        let cells: Vec<Rc<dyn Syncable>> = self
            .inner
            .slots
            .borrow()
            .cells
            .iter()
            .filter_map(|(id, cell)| {
                let live = cell.upgrade();
                debug_assert!(
                    live.is_some(),
                    "mutable registry: cell id={} dropped without being removed",
                    id.0
                );
                live
            })
            .collect();

        let mut changed = false;
        for cell in &cells {
            changed |= cell.sync();
        }
        changed
    }
}

impl Default for MutableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MutableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag(Cell<bool>);

    impl Syncable for Flag {
        fn sync(&self) -> bool {
            self.0.replace(false)
        }
    }

    #[test]
    fn add_and_remove_external_cell() {
        let registry = MutableRegistry::new();
        let flag: Rc<dyn Syncable> = Rc::new(Flag(Cell::new(true)));

        let id = registry.add(Rc::downgrade(&flag));
        assert!(registry.contains(id));
        assert!(registry.sync());
        assert!(!registry.sync());

        registry.remove(id);
        assert!(!registry.contains(id));
        assert!(registry.is_empty());
    }

    #[test]
    #[should_panic(expected = "cell registered twice")]
    fn double_add_panics() {
        let registry = MutableRegistry::new();
        let flag: Rc<dyn Syncable> = Rc::new(Flag(Cell::new(false)));
        registry.add(Rc::downgrade(&flag));
        registry.add(Rc::downgrade(&flag));
    }

    #[test]
    #[should_panic(expected = "removing unregistered cell")]
    fn remove_without_add_panics() {
        let registry = MutableRegistry::new();
        registry.remove(MutableId(7));
    }

    #[test]
    fn removed_cell_can_be_added_again() {
        let registry = MutableRegistry::new();
        let flag: Rc<dyn Syncable> = Rc::new(Flag(Cell::new(false)));

        let first = registry.add(Rc::downgrade(&flag));
        registry.remove(first);
        let second = registry.add(Rc::downgrade(&flag));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn many_cells_register_and_deregister() {
        let registry = MutableRegistry::new();
        let cells: Vec<_> = (0..10_000u32).map(|i| registry.mutable(i)).collect();
        assert_eq!(registry.len(), 10_000);

        cells[17].set(0);
        assert!(registry.sync());
        assert!(!registry.sync());

        drop(cells);
        assert!(registry.is_empty());
        assert!(registry.inner().slots.borrow().addrs.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "dropped without being removed")]
    fn sync_with_dropped_external_cell_panics_in_debug() {
        let registry = MutableRegistry::new();
        let flag: Rc<dyn Syncable> = Rc::new(Flag(Cell::new(false)));
        registry.add(Rc::downgrade(&flag));
        drop(flag);
        registry.sync();
    }

    #[test]
    fn ids_are_not_reused() {
        let registry = MutableRegistry::new();
        let a = registry.mutable(1u8);
        let a_id = a.id();
        drop(a);
        let b = registry.mutable(1u8);
        assert_ne!(a_id, b.id());
    }
}
