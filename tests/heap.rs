use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use csr_sssp::{DaryHeap, Handle, MaxFirst, MinFirst};

fn drain<T, O: csr_sssp::HeapOrder<T>, const K: usize>(h: &mut DaryHeap<T, O, K>) -> Vec<T> {
    let mut out = Vec::with_capacity(h.len());
    while let Some(x) = h.try_pop() { out.push(x); }
    out
}

#[test]
fn pops_come_out_in_priority_order(){
    let mut rng = SmallRng::seed_from_u64(7);
    for n in [0usize, 1, 2, 5, 17, 64, 333] {
        let values: Vec<u32> = (0..n).map(|_| rng.gen_range(0..50)).collect(); // plenty of duplicates

        let mut max: DaryHeap<u32> = DaryHeap::new();
        for &x in &values { max.push(x); }
        let mut expected = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(drain(&mut max), expected);

        let mut min: DaryHeap<u32, MinFirst, 2> = DaryHeap::new();
        for &x in &values { min.push(x); }
        expected.reverse();
        assert_eq!(drain(&mut min), expected);
    }
}

#[test]
fn closure_comparator_orders_by_key(){
    let by_len = |a: &&str, b: &&str| a.len() < b.len();
    let mut h: DaryHeap<&str, _, 3> = DaryHeap::with_order(by_len);
    for w in ["kiwi", "fig", "banana", "apple", "date"] { h.push(w); }
    assert_eq!(*h.top(), "banana");
    let lens: Vec<usize> = drain(&mut h).iter().map(|w| w.len()).collect();
    assert_eq!(lens, vec![6, 5, 4, 4, 3]);
}

#[test]
fn handles_survive_unrelated_operations(){
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut h: DaryHeap<i64, MinFirst, 4> = DaryHeap::new();
    // shadow of every live element keyed by handle
    let mut live: Vec<(Handle, i64)> = Vec::new();
    for step in 0..4000 {
        match rng.gen_range(0..10) {
            0..=3 => {
                let x = rng.gen_range(-1000..1000);
                live.push((h.push(x), x));
            }
            4..=5 if !h.is_empty() => {
                let x = h.pop();
                let idx = live.iter().position(|&(hd, v)| v == x && !h.contains(hd)).expect("popped value was live");
                let (gone, _) = live.swap_remove(idx);
                assert!(h.get(gone).is_none());
            }
            6..=9 if !live.is_empty() => {
                let i = rng.gen_range(0..live.len());
                let (hd, old) = live[i];
                let x = match step % 3 {
                    0 => old - rng.gen_range(0..50),
                    1 => old + rng.gen_range(0..50),
                    _ => rng.gen_range(-1000..1000),
                };
                match step % 3 {
                    0 => h.sift_up(hd, x),
                    1 => h.sift_down(hd, x),
                    _ => h.update(hd, x),
                }
                live[i].1 = x;
            }
            _ => {}
        }
        assert_eq!(h.len(), live.len());
        for &(hd, v) in &live { assert_eq!(h[hd], v); }
        if let Some(&top) = h.peek() { assert_eq!(Some(top), live.iter().map(|&(_, v)| v).min()); }
    }
}

#[test]
fn decrease_key_moves_element_to_top(){
    let mut h: DaryHeap<u32, MinFirst> = DaryHeap::with_capacity(16);
    let hs: Vec<Handle> = (10..26).map(|x| h.push(x)).collect();
    h.sift_up(hs[15], 1);
    assert_eq!(h.position(hs[15]), Some(0));
    assert_eq!(h.pop(), 1);
    h.update(hs[0], 99);
    assert_eq!(h.pop(), 11);
    assert_eq!(h[hs[0]], 99);
    assert_eq!(drain(&mut h).last(), Some(&99));
}

#[test]
fn default_heap_is_max_first(){
    let mut h: DaryHeap<f64, MaxFirst, 8> = DaryHeap::default();
    for x in [0.5, -2.0, 9.25, 3.0] { h.push(x); }
    assert_eq!(h.pop(), 9.25);
    assert_eq!(h.iter().count(), 3);
}
