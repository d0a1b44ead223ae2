//! Contains [`init_tracing`]

use std::path::Path;

use cfg_if::cfg_if;
use tracing::Subscriber;
use tracing_panic::panic_hook;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

cfg_if! {
    if #[cfg(feature = "log-to-file")] {
        use std::fs::{File, OpenOptions};
        use std::sync::Mutex;
        use std::time::SystemTime;
        use tracing::Event;
        use tracing_log::NormalizeEvent;
        use tracing_subscriber::fmt::format::Writer;
        use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
        use tracing_subscriber::registry::LookupSpan;
        use tracing_subscriber::Registry;
    }
}

cfg_if! {
    if #[cfg(any(feature = "log-to-console", feature = "log-to-file"))] {
        use tracing::metadata::LevelFilter;
        use tracing_subscriber::{EnvFilter, Layer};
    }
}

/// Environment variable holding the [`EnvFilter`](tracing_subscriber::EnvFilter) directives.
pub const LOG_ENV_VAR: &str = "BOOTPROBE_LOG";

/// Directory log files are written to, relative to the working directory.
const LOG_DIRECTORY: &str = "logs";

/// Prefix of every log file this binary writes. Only these files are ever rotated.
#[cfg(feature = "log-to-file")]
const LOG_FILE_PREFIX: &str = "bootprobe_log_";

/// Installs the global tracing subscriber and routes panics through it.
///
/// If the feature `log-to-console` is set then records are written to stderr. Stdout is reserved
/// for the version report.
/// If the feature `log-to-file` is set then records are also written to a file under `logs/`.
/// Both can be set. A log file that cannot be opened only costs the file sink.
pub fn init_tracing() {
    if let Err(err) = build_subscriber(Path::new(LOG_DIRECTORY)).try_init() {
        eprintln!("Failed to set the tracing subscriber: {err}");
    }

    // Feed panic through tracing
    let old_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |infos| {
        panic_hook(infos);
        old_hook(infos);
    }));
}

/// Builds the subscriber with every sink enabled by cargo features.
#[cfg_attr(not(feature = "log-to-file"), allow(unused_variables))]
fn build_subscriber(log_directory: &Path) -> impl Subscriber + Send + Sync + 'static {
    cfg_if! {
        if #[cfg(feature = "log-to-console")]
        {
            let filter = EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy();

            let stderr_log =
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(filter);
        } else {
            // This creates a layer that does nothing
            let stderr_log = tracing_subscriber::layer::Identity::new();
        }
    }

    cfg_if! {
        if #[cfg(feature = "log-to-file")]
        {
            let file_log = file_layer::<Registry>(log_directory);
        } else {
            let file_log = tracing_subscriber::layer::Identity::new();
        }
    }

    registry().with(file_log).with(stderr_log)
}

/// Opens a fresh log file under `directory` and wraps it in a layer.
///
/// Returns `None` (after saying so on stderr) when the file cannot be opened.
#[cfg(feature = "log-to-file")]
fn file_layer<S>(directory: &Path) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let file = match get_log_file(directory) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Failed to open log file: {err}");
            return None;
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    Some(
        tracing_subscriber::fmt::layer()
            .event_format(FileFormatter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_filter(filter),
    )
}

#[cfg(feature = "log-to-file")]
/// Prepares the log directory and opens a fresh log file for this run.
fn get_log_file(directory: &Path) -> Result<File, std::io::Error> {
    initialize_log_directory(directory)?;

    let date = chrono::Utc::now();
    let file_name = date
        .format("%Y-%m-%d_%H-%M-%S-%f.log")
        .to_string();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(directory.join(format!("{LOG_FILE_PREFIX}{file_name}")))?;
    Ok(file)
}

/// Creates the log directory if needed and gzips the logs earlier runs left behind.
///
/// Files not named `bootprobe_log_*.log` are left alone.
#[cfg(feature = "log-to-file")]
fn initialize_log_directory(directory: &Path) -> Result<(), std::io::Error> {
    if !directory.exists() {
        std::fs::create_dir_all(directory)?;
    }

    for log in std::fs::read_dir(directory)? {
        let log = log?;
        let path = log.path();

        if !log.metadata()?.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        if file_name.starts_with(LOG_FILE_PREFIX) && file_name.ends_with(".log") {
            rotate_log(&path)?;
        }
    }

    Ok(())
}

/// Replaces the log at `path` with `<path>.gz`.
///
/// On failure the original is kept and no partial archive is left behind.
#[cfg(feature = "log-to-file")]
fn rotate_log(path: &Path) -> Result<(), std::io::Error> {
    let mut compressed_file_name = path.as_os_str().to_owned();
    compressed_file_name.push(".gz");
    let compressed_file_path = Path::new(&compressed_file_name);

    if let Err(err) = compress(path, compressed_file_path) {
        let _ = std::fs::remove_file(compressed_file_path);
        return Err(err);
    }

    std::fs::remove_file(path)
}

/// Gzips `source` into `destination`.
#[cfg(feature = "log-to-file")]
fn compress(source: &Path, destination: &Path) -> Result<(), std::io::Error> {
    let file = File::open(source)?;
    let mut reader = std::io::BufReader::new(file);
    let mut compressed_file = flate2::write::GzEncoder::new(
        File::create(destination)?,
        flate2::Compression::default(),
    );

    std::io::copy(&mut reader, &mut compressed_file)?;
    compressed_file.finish()?;

    Ok(())
}

#[cfg(feature = "log-to-file")]
/// Formatting for logging to files
///
/// Will format events in the following format:
/// \[\<timestamp>] \[\<level>] \[\<target>]: \<message>
///
/// Example:
/// \[2024-05-05T05:15:02.623Z] \[INFO] \[bootprobe::report]: Initializing every subsystem...
struct FileFormatter;

#[cfg(feature = "log-to-file")]
impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.normalized_metadata();
        let metadata = metadata.as_ref().unwrap_or(event.metadata());

        let time = humantime::format_rfc3339_millis(SystemTime::now());

        write!(
            &mut writer,
            "[{}] [{}] [{}]: ",
            time,
            metadata.level(),
            metadata.target()
        )?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<tracing_subscriber::fmt::FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
