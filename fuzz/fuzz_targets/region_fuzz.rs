#![no_main]
use libfuzzer_sys::fuzz_target;
use runedata::buffer::ByteCursor;
use runedata::region::{RegionDefinition, RenderRule};

fuzz_target!(|data: &[u8]| {
    let mut region = RegionDefinition::new(50, 50);
    let _ = region.decode_landscape(&mut ByteCursor::new(data));

    // Objects decoded against an arbitrary bridge layout.
    let split = data.len() / 2;
    let (land, objects) = data.split_at(split);
    let mut region = RegionDefinition::new(50, 50);
    for (i, &b) in land.iter().take(4096).enumerate() {
        region
            .render_rules
            .set(1, i / 64, i % 64, RenderRule::from_bits_retain(b));
    }
    let before = region.objects.clone();
    if region.decode_objects(&mut ByteCursor::new(objects)).is_err() {
        assert_eq!(region.objects, before);
    }
});
