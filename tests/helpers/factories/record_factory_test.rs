use crate::test_helpers::factory::Factory;

#[test]
fn test_record_factory() {
    let record = Factory::record()
        .on(2022, 6, 1)
        .with_dimension("district", "Pune")
        .price(1500.0)
        .with_measurement("rainfall_mm", 80.0)
        .create();

    assert_eq!(record.timestamp.to_string(), "2022-06-01");
    assert_eq!(record.dimension("district"), Some("Pune"));
    assert_eq!(record.measurement("modal_price"), Some(1500.0));
    assert_eq!(record.measurement("rainfall_mm"), Some(80.0));
}
