use ebtree::{cba_delete, cba_insert, cba_lookup_le, CbEntry, CbTree};
use ebtree::Absolute;
use std::ptr::NonNull;

fn boxed() -> NonNull<CbEntry<Absolute>> {
    let b = Box::new(CbEntry::<Absolute>::new(0));
    NonNull::new(Box::into_raw(b)).unwrap()
}

fn main() {
    let mut tree: CbTree<Absolute> = CbTree::new_unique();
    let mut regions: Vec<_> = (0..4).map(|_| boxed()).collect();
    regions.sort_by_key(|p| p.as_ptr() as usize);

    unsafe {
        for &r in &regions {
            cba_insert(&mut tree, r);
        }

        let probe = regions[2].as_ptr() as usize + 1;
        let owner = cba_lookup_le(&tree, probe).unwrap();
        println!("address {:#x} falls in region at {:#x}", probe, owner.as_ptr() as usize);

        for &r in &regions {
            cba_delete(&mut tree, r);
            drop(Box::from_raw(r.as_ptr()));
        }
    }
}
