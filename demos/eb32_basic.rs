use ebtree::eb32::{self, EbTree, TreeEntry};
use ebtree::Absolute;
use std::ptr::NonNull;

fn boxed(key: u32) -> NonNull<TreeEntry<Absolute>> {
    let b = Box::new(TreeEntry::<Absolute>::new(key));
    NonNull::new(Box::into_raw(b)).unwrap()
}

fn main() {
    let mut tree: EbTree<Absolute> = EbTree::new();
    let entries: Vec<_> = [5u32, 2, 8, 1, 9, 3, 7].into_iter().map(boxed).collect();

    unsafe {
        for &e in &entries {
            eb32::insert(&mut tree, e);
        }

        print!("ascending order:");
        let mut cur = eb32::first(&tree);
        while let Some(e) = cur {
            print!(" {}", e.as_ref().key);
            cur = eb32::next(e);
        }
        println!();

        println!("lookup_ge(4) = {:?}", eb32::lookup_ge(&tree, 4).map(|e| e.as_ref().key));
        println!("lookup_le(4) = {:?}", eb32::lookup_le(&tree, 4).map(|e| e.as_ref().key));

        for &e in &entries {
            eb32::delete(&mut tree, e);
            drop(Box::from_raw(e.as_ptr()));
        }
    }
}
