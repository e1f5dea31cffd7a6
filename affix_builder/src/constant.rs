pub(crate) const DEFAULT_ARGUMENT: &str = "ARG";
pub(crate) const END_OF_OPTIONS: &str = "--";
pub(crate) const ESCAPE_NEXT: &str = "++";
// Only the first few unrecognised options are reported individually.
pub(crate) const UNRECOGNISED_REPORT_LIMIT: usize = 5;

pub(crate) const BOLD: (&str, &str) = ("\x1b[01m", "\x1b[21m");
pub(crate) const DIM: (&str, &str) = ("\x1b[02m", "\x1b[22m");
pub(crate) const EMPHASIS: (&str, &str) = ("\x1b[04m", "\x1b[24m");
pub(crate) const RESET: &str = "\x1b[00m";
pub(crate) const SYNOPSIS_COLOURS: [&str; 2] = ["36", "34"];
