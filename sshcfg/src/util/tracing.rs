//! Tracing helpers
// (c) 2024 Ross Younger

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize, de};
use strum::VariantNames as _;
use tracing_subscriber::{
    EnvFilter,
    fmt::time::{ChronoLocal, ChronoUtc},
    prelude::*,
};

use crate::cli::styles::use_colours;

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

const FRIENDLY_FORMAT_LOCAL: &str = "%Y-%m-%d %H:%M:%SL";
const FRIENDLY_FORMAT_UTC: &str = "%Y-%m-%d %H:%M:%SZ";

/// Environment variable that controls what gets logged to stderr
const STANDARD_ENV_VAR: &str = "RUST_LOG";

/// Selects the format of time stamps in output messages
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
    clap::ValueEnum,
    Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    /// Local time (as best as we can figure it out), as "year-month-day HH:MM:SS"
    #[default]
    Local,
    /// UTC time, as "year-month-day HH:MM:SS"
    Utc,
    /// UTC time, in the format described in [RFC 3339](https://datatracker.ietf.org/doc/html/rfc3339).
    ///
    /// Examples:
    /// `1997-11-12T09:55:06-06:00`
    /// `2010-03-14T18:32:03Z`
    Rfc3339,
}

impl<'de> Deserialize<'de> for TimeFormat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let lower = s.to_ascii_lowercase();
        // requires strum::EnumString && strum::VariantNames && #[strum(serialize_all = "lowercase")]
        std::str::FromStr::from_str(&lower)
            .map_err(|_| de::Error::unknown_variant(&s, TimeFormat::VARIANTS))
    }
}

/// Result type for `filter_for()`
struct FilterResult {
    filter: EnvFilter,
    used_env: bool, // Did we use the environment variable we were requested to?
}

/// Log filter setup:
/// Use a given environment variable; if it wasn't present, log only our own items at a given trace level.
fn filter_for(trace_level: &str, key: &str) -> anyhow::Result<FilterResult> {
    EnvFilter::try_from_env(key)
        .map(|filter| FilterResult {
            filter,
            used_env: true,
        })
        .or_else(|e| {
            // The env var was unset or invalid. Which is it?
            if std::env::var(key).is_ok() {
                anyhow::bail!("{key} (set in environment) was not understood: {e}");
            }
            // It was unset. Fall back.
            Ok(FilterResult {
                filter: EnvFilter::try_new(format!("sshcfg={trace_level}"))?,
                used_env: false,
            })
        })
}

type BoxedLayer = Box<dyn tracing_subscriber::Layer<tracing_subscriber::Registry> + Send + Sync>;

fn make_tracing_layer(
    filter: EnvFilter,
    time_format: TimeFormat,
    show_target: bool,
    ansi: bool,
) -> BoxedLayer {
    // The common bit
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(show_target)
        .with_ansi(ansi);

    // Unfortunately, you have to add the timer before you can add the writer and filter, so
    // there's a bit of duplication here:
    match time_format {
        TimeFormat::Local => layer
            .with_timer(ChronoLocal::new(FRIENDLY_FORMAT_LOCAL.into()))
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        TimeFormat::Utc => layer
            .with_timer(ChronoUtc::new(FRIENDLY_FORMAT_UTC.into()))
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        TimeFormat::Rfc3339 => layer
            .with_timer(ChronoLocal::rfc_3339())
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

/// Set up rust tracing to stderr.
///
/// By default we log only our events (sshcfg), at a given trace level.
/// This can be overridden by setting `RUST_LOG`.
///
/// **CAUTION:** If this function fails, tracing won't be set up; callers must take extra care to report the error.
///
/// **NOTE:** You can only run this once per process. A global bool prevents re-running.
pub(crate) fn setup(trace_level: &str, time_format: TimeFormat) -> anyhow::Result<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        tracing::warn!("tracing::setup called a second time (ignoring)");
        return Ok(());
    }

    let layer = setup_inner(trace_level, time_format).inspect_err(|_| {
        TRACING_INITIALIZED.store(false, Ordering::Relaxed);
    })?;
    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}

pub(crate) fn setup_inner(trace_level: &str, time_format: TimeFormat) -> anyhow::Result<BoxedLayer> {
    let filter = filter_for(trace_level, STANDARD_ENV_VAR)?;
    // If we used the environment variable, show log targets; if we did not, we're only logging ourselves, so do not show targets.
    Ok(make_tracing_layer(
        filter.filter,
        time_format,
        filter.used_env,
        use_colours(),
    ))
}

/// Returns whether tracing has been initialized
pub(crate) fn is_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::Relaxed)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod test {
    use pretty_assertions::assert_eq;
    use rusty_fork::rusty_fork_test;
    use tracing_subscriber::EnvFilter;

    use super::{TimeFormat, setup, setup_inner};

    #[test]
    fn create_layer() {
        let _layer = setup_inner("info", TimeFormat::Local).unwrap();
    }

    #[test]
    fn invalid_level() {
        let result = setup_inner("invalid_level", TimeFormat::Utc);
        assert!(result.is_err());
    }

    #[test]
    fn tracing_layer_rfc3339() {
        let f = EnvFilter::new("");
        let _result = super::make_tracing_layer(f, TimeFormat::Rfc3339, false, false);
        // it doesn't seem possible to usefully test the created layer at the moment
    }

    #[test]
    fn time_format_deserializes_case_insensitively() {
        let tf: TimeFormat = serde_json::from_str("\"UTC\"").unwrap();
        assert_eq!(tf, TimeFormat::Utc);
        let e = serde_json::from_str::<TimeFormat>("\"martian\"").unwrap_err();
        assert!(e.to_string().contains("unknown variant"));
    }

    // these tests affect global state, so need to run in forks
    rusty_fork_test! {
        #[test]
        fn setup_initialization() {
            assert!(!super::is_initialized());
            setup("info", TimeFormat::Utc).unwrap();
            assert!(super::is_initialized());
            // a second call must succeed (albeit with a warning)
            setup("debug", TimeFormat::Utc).unwrap();
        }
    }
}
