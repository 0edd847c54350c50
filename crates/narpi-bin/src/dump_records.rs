/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::info;
use narpi::region::{positioned_records, RegionRecord};
use narpi::Container;

use crate::errors::CliErrors;

/// `column:height` pairs for every column taller than one pixel,
/// both 1-based
fn format_verticals(record: &RegionRecord) -> String {
    if record.verticals().is_empty() {
        return "none".to_string();
    }
    record
        .verticals()
        .iter()
        .map(|(column, count)| format!("{}:{}", u16::from(*column) + 1, u32::from(*count) + 1))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Log every region record of `container` with its 1-based position
/// and its footprint
pub fn dump_records(container: &Container) -> Result<(), CliErrors> {
    let Some(records) = container.region_records() else {
        info!("Plane payloads carry no region records");
        return Ok(());
    };
    let records = records?;
    let (width, height) = (usize::from(container.width()), usize::from(container.height()));

    info!(
        "NARPI {} {}x{}, {} records",
        container.version(),
        width,
        height,
        records.len()
    );
    for (number, ((x, y), record)) in positioned_records(&records, width, height)?
        .into_iter()
        .enumerate()
    {
        let [r, g, b] = record.color();
        info!(
            "#{} at ({}, {}) color ({r}, {g}, {b}) size {}x{} verticals {}",
            number + 1,
            x + 1,
            y + 1,
            record.columns(),
            record.rows(),
            format_verticals(record)
        );
        for row in record.footprint() {
            info!("    {row}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use narpi::narpi_core::options::Strategy;
    use narpi::region::RegionRecord;
    use narpi::{Container, Raster};

    use crate::dump_records::{dump_records, format_verticals};

    #[test]
    fn test_format_verticals() {
        let flat = RegionRecord::new([0, 0, 0], 3, BTreeMap::new()).unwrap();
        assert_eq!(format_verticals(&flat), "none");

        let shaped = RegionRecord::new([0, 0, 0], 3, BTreeMap::from([(0, 2), (3, 599)])).unwrap();
        assert_eq!(format_verticals(&shaped), "1:3 4:600");
    }

    #[test]
    fn test_dump_both_strategies() {
        let mut raster = Raster::filled(4, 4, [1, 1, 1]);
        raster.set_pixel(2, 2, [9, 9, 9]);

        for strategy in [Strategy::Region, Strategy::Plane] {
            let container = Container::encode(&raster, strategy).unwrap();
            dump_records(&container).unwrap();
        }
    }
}
