use energy_dialog::energy::StatisticMetadata;
use energy_dialog::ui::picker::{PickerFilter, StatisticPickerState};
use std::path::Path;

fn demo_catalog() -> Vec<StatisticMetadata> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/statistics.json");
    StatisticMetadata::load_catalog(&path).expect("demo catalog loads")
}

#[test]
fn demo_catalog_parses() {
    let catalog = demo_catalog();
    assert_eq!(catalog.len(), 6);
    assert!(catalog.iter().all(|s| s.name.is_some()));
}

#[test]
fn demo_catalog_offers_only_energy_entities_by_default() {
    let catalog = demo_catalog();
    let matches = StatisticPickerState::default().matches(&catalog, &PickerFilter::default());
    let ids: Vec<&str> = matches.iter().map(|s| s.statistic_id.as_str()).collect();

    assert_eq!(
        ids,
        vec![
            "sensor.fridge_energy",
            "sensor.washing_machine_energy",
            "sensor.dishwasher_energy",
            "sensor.heat_pump_energy",
        ]
    );
}
