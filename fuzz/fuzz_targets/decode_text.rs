use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(text) = std::str::from_utf8(data) {
                if let Ok(tree) = itree::decode(text) {
                    let again = itree::decode(&tree.to_string()).unwrap();
                    assert_eq!(again, tree);
                }
            }
        });
    }
}
