mod format;
mod record;

pub(crate) use format::format_interval;
pub(crate) use record::{banner, footer, sample_line, title};
