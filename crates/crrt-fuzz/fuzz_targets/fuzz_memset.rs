#![no_main]
use crrt_core::string::memset;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let value = data[0];
    let n = usize::from(data[1]);
    let mut dest = data[2..].to_vec();
    let original = dest.clone();

    let set = memset(&mut dest, value, n);
    assert_eq!(set, n.min(dest.len()));
    assert!(dest[..set].iter().all(|&b| b == value));
    assert_eq!(dest[set..], original[set..]);
});
