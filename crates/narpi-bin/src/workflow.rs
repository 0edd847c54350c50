/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::io::{stdin, BufRead};
use std::path::Path;
use std::time::Instant;

use clap::ArgMatches;
use log::{debug, info};
use narpi::{Container, Raster};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::cmd_parsers::{get_decoder_options, get_encoder_options};
use crate::dump_records::dump_records;
use crate::errors::CliErrors;
use crate::file_io::{write_output, ImageFormat};
use crate::standard::{decode_standard_image, encode_standard_image};

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), CliErrors> {
    info!("Creating workflows from input");

    let inputs: Vec<&OsStr> = args.get_raw("in").map(Iterator::collect).unwrap_or_default();
    let outputs: Vec<&OsStr> = args.get_raw("out").map(Iterator::collect).unwrap_or_default();

    if outputs.is_empty() {
        return Err(CliErrors::from("No output file given, use -o or --probe"));
    }
    if inputs.len() != outputs.len() {
        return Err(CliErrors::GenericString(format!(
            "Got {} inputs but {} outputs",
            inputs.len(),
            outputs.len()
        )));
    }
    for (in_file, out_file) in inputs.into_iter().zip(outputs) {
        let overwrite = verify_file_paths(in_file, out_file, cmd_opts)?;
        convert_file(Path::new(in_file), Path::new(out_file), overwrite, cmd_opts)?;
    }
    Ok(())
}

/// Check input and output paths, asking before an existing output
/// is replaced
///
/// Returns whether the output may be overwritten.
fn verify_file_paths(p0: &OsStr, p1: &OsStr, cmd_opts: &CmdOptions) -> Result<bool, CliErrors> {
    if p0 == p1 {
        return Err(CliErrors::GenericString(format!(
            "Cannot use {:?} as both input and output",
            p0
        )));
    }
    let in_path = Path::new(p0);
    let out_path = Path::new(p1);

    if !in_path.exists() {
        return Err(CliErrors::GenericString(format!(
            "Path {:?}, does not exist",
            in_path
        )));
    }
    if !in_path.is_file() {
        return Err(CliErrors::GenericString(format!(
            "Path {:?} is not a file",
            in_path
        )));
    }
    if !out_path.exists() {
        return Ok(false);
    }
    if cmd_opts.override_files {
        info!("Overwriting path {:?} ", p1);
        return Ok(true);
    }
    println!("File {:?} exists, overwrite [y/N]", out_path);
    let mut result = String::new();
    stdin().lock().read_line(&mut result)?;

    if result.trim() != "y" {
        return Err(CliErrors::GenericString(format!(
            "Not overwriting file {:?}",
            out_path
        )));
    }
    Ok(true)
}

/// Decode `data` into a raster, NARPI or standard format alike
fn read_raster(data: &[u8], cmd_opts: &CmdOptions) -> Result<Raster, CliErrors> {
    if ImageFormat::guess_format(data) != Some(ImageFormat::Narpi) {
        return decode_standard_image(data);
    }
    debug!("Treating input as a NARPI file");

    let container = Container::from_bytes(data)?;
    if cmd_opts.dump_records {
        dump_records(&container)?;
    }
    Ok(container.decode_with_options(&get_decoder_options(cmd_opts))?)
}

fn convert_file(
    in_path: &Path, out_path: &Path, overwrite: bool, cmd_opts: &CmdOptions
) -> Result<(), CliErrors> {
    let out_format = ImageFormat::from_extension(out_path).ok_or_else(|| {
        CliErrors::UnsupportedFormat(format!(
            "cannot tell output format of {:?}, use .narpi, .png, .jpg or .ppm",
            out_path
        ))
    })?;
    let start = Instant::now();
    let data = std::fs::read(in_path)?;
    let raster = read_raster(&data, cmd_opts)?;

    info!(
        "Decoded {:?} ({}x{}) in {:?}",
        in_path,
        raster.width(),
        raster.height(),
        start.elapsed()
    );
    let start = Instant::now();

    let written = if out_format == ImageFormat::Narpi {
        let options = get_encoder_options(cmd_opts, raster.width(), raster.height());
        let container = Container::encode_with_options(&raster, &options)?;

        if cmd_opts.dump_records && ImageFormat::guess_format(&data) != Some(ImageFormat::Narpi) {
            dump_records(&container)?;
        }
        container.save_to_file(out_path, overwrite)?;
        container.encoded_size()
    } else {
        let bytes = encode_standard_image(&raster, out_format)?;
        write_output(out_path, &bytes, overwrite)?;
        bytes.len()
    };
    info!("Encoded {:?} in {:?}", out_path, start.elapsed());
    info!("{}", size_report(data.len(), written));

    Ok(())
}

/// Describe the change in size from `input` to `output` bytes
fn size_report(input: usize, output: usize) -> String {
    if input == 0 {
        return format!("Wrote {output} bytes from an empty input");
    }
    let gain = (1.0 - output as f64 / input as f64) * 100.0;
    format!("Size {input} -> {output} bytes, gain {gain:.2}%")
}
