#![no_main]
use libfuzzer_sys::fuzz_target;
use runedata::config::ConfigKind;

fuzz_target!(|data: &[u8]| {
    // First byte picks the kind; the rest is the record.
    let Some((&selector, record)) = data.split_first() else {
        return;
    };
    let kind = ConfigKind::ALL[usize::from(selector) % ConfigKind::ALL.len()];
    let _ = kind.decode_any(0, record);
});
