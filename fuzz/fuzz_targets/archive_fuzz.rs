#![no_main]
use libfuzzer_sys::fuzz_target;
use runedata::store::Archive;

fuzz_target!(|data: &[u8]| {
    let Some((&count, payload)) = data.split_first() else {
        return;
    };
    if let Ok(archive) = Archive::decode(payload, usize::from(count)) {
        assert_eq!(archive.len(), usize::from(count));
    }
});
