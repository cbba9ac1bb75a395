use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(tree) = itree::Itree::from_bytes(data) {
                assert_eq!(tree.as_bytes().as_slice(), data);
                let repacked = itree::Itree::from_segments(&tree.segments()).unwrap();
                assert_eq!(repacked, tree);
            }
        });
    }
}
