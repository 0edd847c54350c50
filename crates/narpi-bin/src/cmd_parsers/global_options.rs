/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, Level};
use narpi_core::options::{Strategy, DEFAULT_SPLIT_THRESHOLD};

use crate::cmd_args::IStrategy;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub max_width:       usize,
    pub max_height:      usize,
    pub strict_mode:     bool,
    pub override_files:  bool,
    pub strategy:        Strategy,
    pub split_threshold: u8,
    pub dump_records:    bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            max_width:       65535,
            max_height:      65535,
            strict_mode:     true,
            override_files:  false,
            strategy:        Strategy::Region,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            dump_records:    false
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    if let Some(strategy) = options.get_one::<IStrategy>("strategy") {
        cmd_options.strategy = strategy.to_strategy();
    }
    if let Some(threshold) = options.get_one::<u8>("split-threshold") {
        cmd_options.split_threshold = *threshold;
    }
    info!("Encoding strategy: {}", cmd_options.strategy);

    if options.value_source("all-yes") == Some(ValueSource::CommandLine) {
        info!("Setting all commands to yes");
        cmd_options.override_files = true;
    }
    if options.value_source("no-strict") == Some(ValueSource::CommandLine) {
        info!("Disabling strict mode, trailing payload bytes are only reported");
        cmd_options.strict_mode = false;
    }
    if options.value_source("dump-records") == Some(ValueSource::CommandLine) {
        cmd_options.dump_records = true;
    }
    cmd_options
}

/// Set up logging options
///
/// Record dumps are logged at info level, so asking for them
/// raises the default level to info.
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") || options.get_flag("dump-records") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
