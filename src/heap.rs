//! Addressable d-ary heap with stable handles.
//!
//! Values live in a slab of slots; the heap array stores slot indices and
//! every slot records its current heap position. A [`Handle`] names a slot
//! plus the slot's generation, so it keeps addressing the same element while
//! that element moves, and stops validating once the element is popped even
//! if the slot gets reused.
//!
//! Ordering follows the "prefer larger" convention: `order.less(a, b)` means
//! `b` belongs nearer the top. [`MaxFirst`] is the default; pass [`MinFirst`]
//! or a closure `|a, b| a > b` for a min-queue.

use core::ops::Index;

/// Strict weak ordering used by the heap. `less(a, b)` puts `b` above `a`.
pub trait HeapOrder<T> {
    fn less(&self, a: &T, b: &T) -> bool;
}

/// Largest element on top.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaxFirst;

/// Smallest element on top.
#[derive(Copy, Clone, Debug, Default)]
pub struct MinFirst;

impl<T: PartialOrd> HeapOrder<T> for MaxFirst {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool { a < b }
}

impl<T: PartialOrd> HeapOrder<T> for MinFirst {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool { a > b }
}

impl<T, F: Fn(&T, &T) -> bool> HeapOrder<T> for F {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool { self(a, b) }
}

/// Stable reference to an enqueued element.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Handle {
    slot: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: Option<T>,
    pos: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
pub struct DaryHeap<T, O = MaxFirst, const K: usize = 4> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    // heap array of slot indices
    order: Vec<u32>,
    cmp: O,
}

impl<T, O: HeapOrder<T> + Default, const K: usize> DaryHeap<T, O, K> {
    pub fn new() -> Self { Self::with_order(O::default()) }

    pub fn with_capacity(cap: usize) -> Self { Self::with_order_and_capacity(O::default(), cap) }
}

impl<T, O: HeapOrder<T> + Default, const K: usize> Default for DaryHeap<T, O, K> {
    fn default() -> Self { Self::new() }
}

impl<T, O: HeapOrder<T>, const K: usize> DaryHeap<T, O, K> {
    pub fn with_order(cmp: O) -> Self { Self::with_order_and_capacity(cmp, 0) }

    pub fn with_order_and_capacity(cmp: O, cap: usize) -> Self {
        assert!(K >= 2, "heap arity must be at least 2");
        Self { slots: Vec::with_capacity(cap), free: Vec::new(), order: Vec::with_capacity(cap), cmp }
    }

    #[inline] pub fn len(&self) -> usize { self.order.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn reserve(&mut self, additional: usize) {
        self.order.reserve(additional);
        self.slots.reserve(additional.saturating_sub(self.free.len()));
    }

    /// Drops every element and invalidates all outstanding handles. Slot
    /// storage is kept for reuse.
    pub fn clear(&mut self) {
        for &s in &self.order {
            let slot = &mut self.slots[s as usize];
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(s);
        }
        self.order.clear();
    }

    pub fn push(&mut self, value: T) -> Handle {
        let pos = self.order.len();
        let slot = match self.free.pop() {
            Some(s) => {
                let slot = &mut self.slots[s as usize];
                slot.value = Some(value);
                slot.pos = pos;
                s
            }
            None => {
                let s = u32::try_from(self.slots.len()).unwrap_or_else(|_| panic!("heap slot count exceeds u32::MAX"));
                self.slots.push(Slot { value: Some(value), pos, generation: 0 });
                s
            }
        };
        self.order.push(slot);
        self.sift_up_from(pos);
        Handle { slot, generation: self.slots[slot as usize].generation }
    }

    /// # Panics
    /// If the heap is empty.
    #[inline]
    pub fn top(&self) -> &T {
        assert!(!self.is_empty(), "top() on empty heap");
        self.at(0)
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> { if self.is_empty() { None } else { Some(self.at(0)) } }

    /// # Panics
    /// If the heap is empty.
    pub fn pop(&mut self) -> T {
        assert!(!self.is_empty(), "pop() on empty heap");
        let removed = self.order.swap_remove(0);
        if !self.order.is_empty() {
            let moved = self.order[0] as usize;
            self.slots[moved].pos = 0;
            self.sift_down_from(0);
        }
        let slot = &mut self.slots[removed as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(removed);
        match slot.value.take() {
            Some(v) => v,
            None => unreachable!("heap root referred to a vacant slot"),
        }
    }

    pub fn try_pop(&mut self) -> Option<T> { if self.is_empty() { None } else { Some(self.pop()) } }

    /// Current value behind `h`, or `None` once it has been popped.
    pub fn get(&self, h: Handle) -> Option<&T> {
        match self.slots.get(h.slot as usize) {
            Some(s) if s.generation == h.generation => s.value.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, h: Handle) -> bool { self.get(h).is_some() }

    /// Heap position of `h`'s element (0 is the top).
    pub fn position(&self, h: Handle) -> Option<usize> {
        self.get(h).map(|_| self.slots[h.slot as usize].pos)
    }

    /// Replaces the value behind `h` and restores heap order in whichever
    /// direction the new value requires.
    ///
    /// # Panics
    /// If `h` no longer refers to an enqueued element.
    pub fn update(&mut self, h: Handle, value: T) {
        let i = self.replace(h, value);
        if i > 0 && self.cmp.less(self.at((i - 1) / K), self.at(i)) {
            self.sift_up_from(i);
        } else {
            self.sift_down_from(i);
        }
    }

    /// Replaces the value behind `h` with one known to rank at least as high
    /// (decrease-key for a min-queue).
    pub fn sift_up(&mut self, h: Handle, value: T) {
        let i = self.replace(h, value);
        self.sift_up_from(i);
    }

    /// Replaces the value behind `h` with one known to rank no higher.
    pub fn sift_down(&mut self, h: Handle, value: T) {
        let i = self.replace(h, value);
        self.sift_down_from(i);
    }

    pub fn order(&self) -> &O { &self.cmp }

    /// Values in heap-array order (not priority order).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ { (0..self.len()).map(move |i| self.at(i)) }

    // ---------------- internals ----------------

    fn replace(&mut self, h: Handle, value: T) -> usize {
        let slot = match self.slots.get_mut(h.slot as usize) {
            Some(s) if s.generation == h.generation && s.value.is_some() => s,
            _ => panic!("stale heap handle {:?}", h),
        };
        slot.value = Some(value);
        slot.pos
    }

    #[inline(always)]
    fn at(&self, i: usize) -> &T {
        match &self.slots[self.order[i] as usize].value {
            Some(v) => v,
            None => unreachable!("heap position {} refers to a vacant slot", i),
        }
    }

    #[inline(always)]
    fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        self.slots[self.order[i] as usize].pos = i;
        self.slots[self.order[j] as usize].pos = j;
    }

    fn sift_up_from(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / K;
            if self.cmp.less(self.at(parent), self.at(i)) { self.swap(i, parent); i = parent; } else { break; }
        }
    }

    fn sift_down_from(&mut self, mut i: usize) {
        let n = self.len();
        loop {
            let first = i * K + 1;
            if first >= n { break; }
            let last = (first + K).min(n);
            let mut best = first;
            for c in first + 1..last {
                if self.cmp.less(self.at(best), self.at(c)) { best = c; }
            }
            if self.cmp.less(self.at(i), self.at(best)) { self.swap(i, best); i = best; } else { break; }
        }
    }
}

impl<T, O: HeapOrder<T>, const K: usize> Index<Handle> for DaryHeap<T, O, K> {
    type Output = T;
    fn index(&self, h: Handle) -> &T {
        match self.get(h) {
            Some(v) => v,
            None => panic!("stale heap handle {:?}", h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants<T, O: HeapOrder<T>, const K: usize>(h: &DaryHeap<T, O, K>) {
        for (i, &s) in h.order.iter().enumerate() {
            assert_eq!(h.slots[s as usize].pos, i, "slot {} records stale position", s);
            if i > 0 { assert!(!h.cmp.less(h.at((i - 1) / K), h.at(i)), "heap order broken at {}", i); }
        }
        let live = h.slots.iter().filter(|s| s.value.is_some()).count();
        assert_eq!(live, h.len());
    }

    #[test]
    fn positions_track_every_swap(){
        let mut h: DaryHeap<i64, MaxFirst, 3> = DaryHeap::new();
        let handles: Vec<Handle> = (0..40).map(|i| h.push((i * 37) % 23)).collect();
        check_invariants(&h);
        for (k, &hd) in handles.iter().enumerate().step_by(3) { h.update(hd, 100 - k as i64); check_invariants(&h); }
        for _ in 0..15 { h.pop(); check_invariants(&h); }
    }

    #[test]
    fn popped_handle_goes_stale_even_when_slot_reused(){
        let mut h: DaryHeap<u32> = DaryHeap::new();
        let a = h.push(9);
        assert_eq!(h.pop(), 9);
        assert!(!h.contains(a));
        let b = h.push(3);
        assert!(h.get(a).is_none());
        assert_eq!(h[b], 3);
    }

    #[test]
    fn clear_invalidates_handles(){
        let mut h: DaryHeap<u32, MinFirst> = DaryHeap::new();
        let a = h.push(1);
        h.push(2);
        h.clear();
        assert!(h.is_empty());
        assert!(!h.contains(a));
        let c = h.push(5);
        assert_eq!(h.position(c), Some(0));
        check_invariants(&h);
    }

    #[test]
    #[should_panic(expected = "stale heap handle")]
    fn update_on_stale_handle_panics(){
        let mut h: DaryHeap<u32> = DaryHeap::new();
        let a = h.push(1);
        h.pop();
        h.update(a, 4);
    }

    #[test]
    #[should_panic(expected = "pop() on empty heap")]
    fn pop_on_empty_panics(){
        let mut h: DaryHeap<u8> = DaryHeap::new();
        h.pop();
    }
}
