/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use narpi::Container;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Header information of one probed file
pub struct Metadata<'a> {
    file:      OsString,
    size:      u64,
    container: &'a Container,
    records:   Option<usize>
}

impl<'a> Metadata<'a> {
    pub fn new(
        file: OsString, size: u64, container: &'a Container, records: Option<usize>
    ) -> Metadata<'a> {
        Metadata {
            file,
            size,
            container,
            records
        }
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Metadata", 8)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("version", self.container.version())?;
        state.serialize_field("strategy", &self.container.strategy())?;
        state.serialize_field("width", &self.container.width())?;
        state.serialize_field("height", &self.container.height())?;
        state.serialize_field("payload_size", &self.container.payload().len())?;
        state.serialize_field("records", &self.records)?;

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use narpi::narpi_core::options::Strategy;
    use narpi::{Container, Raster};

    use crate::serde::Metadata;

    #[test]
    fn test_metadata_json() {
        let container = Container::encode(&Raster::filled(3, 2, [0, 0, 0]), Strategy::Region).unwrap();
        let metadata = Metadata::new(OsString::from("a.narpi"), 20, &container, Some(1));

        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(value["file"], "a.narpi");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["strategy"], "region");
        assert_eq!(value["width"], 3);
        assert_eq!(value["height"], 2);
        assert_eq!(value["payload_size"], container.payload().len());
        assert_eq!(value["records"], 1);
    }
}
