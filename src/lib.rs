pub mod core;

use std::ffi::OsString;

use tracing_subscriber::EnvFilter;

pub use crate::core::config::LaunchConfig;
pub use crate::core::error::{ApplicationError, LauncherError, LauncherResult};
pub use crate::core::launch::{EntryRegistry, EntryResolver, Launcher};
pub use crate::core::loader::LoadingContext;

/// Launch the bundle this executable was started from, forwarding the
/// process arguments to the application's entry point.
pub fn run<R: EntryResolver>(entries: R) -> LauncherResult<()> {
    // Initialize structured logging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let args = collect_args(std::env::args_os().skip(1))?;

    let config = LaunchConfig::for_current_exe()?;
    tracing::info!("Launching bundle {:?}", config.bundle_paths);

    Launcher::from_config(config, entries)?.launch(args)
}

/// Arguments forwarded verbatim. Every one must be valid UTF-8.
pub fn collect_args<I>(args: I) -> LauncherResult<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                LauncherError::Other(format!("Argument is not valid UTF-8: {:?}", raw))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_pass_through_unchanged() {
        let raw = ["--flag", "value with spaces", "", "ünïcode"];
        let args = collect_args(raw.iter().map(OsString::from)).unwrap();
        assert_eq!(args, raw);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_argument_is_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![OsString::from("ok"), OsString::from_vec(vec![0x66, 0xff, 0x6f])];
        let err = collect_args(args).unwrap_err();
        assert!(matches!(err, LauncherError::Other(ref msg) if msg.contains("UTF-8")));
    }
}
