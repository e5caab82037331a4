use runedata::error::CacheError;
use runedata::region::{
    CancelToken, LAYERS, REGION_SIZE, RegionDefinition, RenderRule, load_regions,
    load_regions_with, region_id,
};
use runedata::store::{IndexType, MemoryStore, XteaKey};

const KEY: XteaKey = [7, 7, 7, 7];
const TILES: usize = LAYERS * REGION_SIZE * REGION_SIZE;

/// Landscape with one explicit tile script at `(layer, x, y)` and bare
/// terminators everywhere else.
fn landscape(layer: usize, x: usize, y: usize, script: &[u8]) -> Vec<u8> {
    let at = (layer * REGION_SIZE + x) * REGION_SIZE + y;
    let mut data = vec![0u8; TILES];
    data.splice(at..=at, script.iter().copied());
    data
}

#[test]
fn bridge_tile_lowers_objects_in_loaded_region() {
    // render rule 2 (bridge) plus height 0 on tile (1, 5, 5)
    let land = landscape(1, 5, 5, &[51, 1, 0]);
    // object 0 at layer 1, x 5, y 5: position 0x1145, delta 0x1146
    let objects = [1, 0x91, 0x46, 0b10_10, 0, 0];

    let mut store = MemoryStore::new();
    store.insert_region(40, 60, &land, &objects, KEY).unwrap();

    let regions = load_regions(&store).unwrap();
    assert_eq!(regions.len(), 1);
    let region = &regions[0];
    assert_eq!(region.id(), region_id(40, 60));
    assert_eq!(region.render_rules.get(1, 5, 5), RenderRule::BRIDGE);
    assert_eq!(region.height(1, 5, 5), 0);
    assert_eq!(region.height(2, 5, 5), -240);

    let placed: Vec<_> = region.objects_at(5, 5).collect();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].layer, 0);
    assert_eq!(placed[0].shape, 2);
    assert_eq!(placed[0].orientation, 2);
}

#[test]
fn corrupt_objects_keep_landscape() {
    let mut store = MemoryStore::new();
    let table = IndexType::Regions.id();
    store
        .insert_file(table, 0, Some("m9_9"), &landscape(0, 0, 0, &[1, 2]), None)
        .unwrap();
    store.insert_raw(table, 1, Some("l9_9"), vec![0xBA, 0xD0], Some(KEY));
    store.insert_xtea(region_id(9, 9), KEY);

    let regions = load_regions(&store).unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].height(0, 0, 0), -16);
    assert!(regions[0].objects.is_empty());
}

#[test]
fn loaded_region_serializes() {
    let mut store = MemoryStore::new();
    store
        .insert_region(3, 4, &landscape(0, 0, 1, &[1, 5]), &[5, 10, 0b101, 0, 0], KEY)
        .unwrap();
    let regions = load_regions(&store).unwrap();
    let json = serde_json::to_value(&regions[0]).unwrap();
    assert_eq!(json["x"], 3);
    assert_eq!(json["tile_heights"].as_array().unwrap().len(), TILES);
    assert_eq!(json["tile_heights"][1], -40);
    assert_eq!(json["objects"][0]["id"], 4);
}

#[test]
fn many_regions_load_in_id_order() {
    let mut store = MemoryStore::new();
    for (x, y) in [(60, 1), (10, 200), (10, 3), (255, 255)] {
        store
            .insert_region(x, y, &landscape(0, 0, 0, &[0]), &[0], KEY)
            .unwrap();
    }
    let ids: Vec<u32> = load_regions(&store)
        .unwrap()
        .iter()
        .map(RegionDefinition::id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 4);
}

#[test]
fn cancellation_stops_the_load() {
    let mut store = MemoryStore::new();
    store
        .insert_region(1, 2, &landscape(0, 0, 0, &[0]), &[0], KEY)
        .unwrap();
    let cancel = CancelToken::new();
    let clone = cancel.clone();
    clone.cancel();
    assert!(cancel.is_cancelled());
    assert!(matches!(
        load_regions_with(&store, &cancel),
        Err(CacheError::Cancelled)
    ));
}
