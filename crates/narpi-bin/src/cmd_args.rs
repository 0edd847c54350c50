/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use narpi_core::options::{Strategy, MAX_SPLIT_THRESHOLD};

/// Payload strategy as accepted on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum IStrategy {
    Region,
    Plane
}

impl IStrategy {
    pub const fn to_strategy(self) -> Strategy {
        match self {
            IStrategy::Region => Strategy::Region,
            IStrategy::Plane => Strategy::Plane
        }
    }
}

impl ValueEnum for IStrategy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Region, Self::Plane]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Region => PossibleValue::new("region")
                .help("Flood connected colors into records, best for flat artwork"),
            Self::Plane => PossibleValue::new("plane")
                .help("Run length pack each color channel, best for photographs")
        })
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("narpi")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert images to and from the NARPI format")
        .after_help("Input format is detected from file contents, output format from the \
        output extension (.narpi, .png, .jpg or .ppm)")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the data to")
            .action(ArgAction::Append))
        .arg(Arg::new("strategy")
            .long("strategy")
            .help("Payload strategy used when writing NARPI files")
            .value_parser(value_parser!(IStrategy))
            .default_value("region")
            .help_heading("ENCODING"))
        .arg(Arg::new("split-threshold")
            .long("split-threshold")
            .help("Longest span written by the plane strategy")
            .value_parser(value_parser!(u8).range(1..=i64::from(MAX_SPLIT_THRESHOLD)))
            .default_value("127")
            .help_heading("ENCODING"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Print NARPI header information as json and exit"))
        .arg(Arg::new("dump-records")
            .long("dump-records")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Log every region record with its position and shape"))
        .arg(Arg::new("all-yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Overwrite existing output files without asking"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Largest width the decoder accepts")
            .value_parser(value_parser!(usize))
            .default_value("65535"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Largest height the decoder accepts")
            .value_parser(value_parser!(usize))
            .default_value("65535"))
        .arg(Arg::new("no-strict")
            .long("no-strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Warn about bytes after a complete payload instead of failing"))
}

#[cfg(test)]
mod tests {
    use narpi_core::options::Strategy;

    use crate::cmd_args::{create_cmd_args, IStrategy};

    #[test]
    fn test_command_is_consistent() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn test_parse_strategy_and_threshold() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "narpi",
                "-i",
                "a.png",
                "-o",
                "a.narpi",
                "--strategy",
                "plane",
                "--split-threshold",
                "40"
            ])
            .unwrap();

        let strategy = *matches.get_one::<IStrategy>("strategy").unwrap();
        assert_eq!(strategy.to_strategy(), Strategy::Plane);
        assert_eq!(matches.get_one::<u8>("split-threshold"), Some(&40));
    }

    #[test]
    fn test_threshold_out_of_range() {
        for value in ["0", "128"] {
            let result = create_cmd_args().try_get_matches_from([
                "narpi",
                "-i",
                "a.png",
                "--split-threshold",
                value
            ]);
            assert!(result.is_err());
        }
    }
}
