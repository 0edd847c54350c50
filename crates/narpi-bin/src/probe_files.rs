/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use clap::ArgMatches;
use log::warn;
use narpi::Container;

use crate::errors::CliErrors;
use crate::file_io::ImageFormat;
use crate::serde::Metadata;

/// Probe input files, extract NARPI header information, and print
/// it to standard output as json.
pub fn probe_input_files(args: &ArgMatches) -> Result<(), CliErrors> {
    let Some(inputs) = args.get_raw("in") else {
        return Ok(());
    };
    for in_file in inputs {
        let path = Path::new(in_file);

        if !path.is_file() {
            warn!("Skipping {:?}, not a file", in_file);
            continue;
        }
        let data = std::fs::read(path)?;

        if ImageFormat::guess_format(&data) != Some(ImageFormat::Narpi) {
            warn!("Skipping {:?}, not a NARPI file", in_file);
            continue;
        }
        let container = Container::from_bytes(&data)?;

        let records = match container.region_records() {
            Some(Ok(records)) => Some(records.len()),
            Some(Err(err)) => {
                warn!("Could not read region records of {:?}: {:?}", in_file, err);
                None
            }
            None => None
        };
        let metadata = Metadata::new(in_file.to_os_string(), data.len() as u64, &container, records);

        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|err| CliErrors::GenericString(err.to_string()))?;
        println!("{json}");
    }
    Ok(())
}
