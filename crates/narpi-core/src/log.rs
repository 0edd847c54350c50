/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging shim used when the `log` feature is disabled
//!
//! Every macro type-checks its arguments and then discards them,
//! so call sites stay identical whether or not logging is compiled in.

// exported macros land in the crate root, re-export them here
// so callers can write `narpi_core::log::trace!`
pub use crate::{__debug as debug, __error as error, __info as info, __trace as trace, __warn as warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __error {
    ($($arg:tt)+) => {{
        let _ = core::format_args!($($arg)+);
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __warn {
    ($($arg:tt)+) => {{
        let _ = core::format_args!($($arg)+);
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __info {
    ($($arg:tt)+) => {{
        let _ = core::format_args!($($arg)+);
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __debug {
    ($($arg:tt)+) => {{
        let _ = core::format_args!($($arg)+);
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __trace {
    ($($arg:tt)+) => {{
        let _ = core::format_args!($($arg)+);
    }};
}
