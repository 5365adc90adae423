//! User sensor interchange: exported lists import back to the same sensors,
//! with physical parameters rebuilt from the type tag alone.

use fuzz_harness::prelude::*;
use radar_coverage::{export_user_sensors, import_user_sensors, SensorCatalog};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fuzz_export_import_preserves_sensors(sensors in sensor_set(16)) {
        let mut buf = Vec::new();
        export_user_sensors(&mut buf, &sensors).unwrap();
        let imported = import_user_sensors(buf.as_slice()).unwrap();

        prop_assert_eq!(imported.len(), sensors.len());
        let catalog = SensorCatalog::default();
        for (before, after) in sensors.iter().zip(&imported) {
            prop_assert_eq!(&before.id, &after.id);
            prop_assert_eq!(before.sensor_type, after.sensor_type);
            prop_assert_eq!(before.position, after.position);
            prop_assert_eq!(before.is_active, after.is_active);
            prop_assert_eq!(before.spec(&catalog), after.spec(&catalog));
        }
    }

    #[test]
    fn fuzz_import_never_panics(input in "\\PC{0,200}") {
        let _ = import_user_sensors(input.as_bytes());
    }
}
