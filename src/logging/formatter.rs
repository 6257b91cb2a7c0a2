use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Formatter that wraps each field in brackets:
/// `[TIMESTAMP] [LEVEL] [SCOPE] [TARGET: FILE:LINE]: MESSAGE`
///
/// `SCOPE` is the chain of active spans joined with `>`, root first. Outside
/// any span it falls back to the last segment of the target. The location
/// bracket is written only when `with_location` is set.
#[derive(Debug, Clone, Copy)]
pub struct BracketedFormatter {
    with_location: bool,
}

impl BracketedFormatter {
    pub fn new() -> Self {
        Self {
            with_location: true,
        }
    }

    pub fn with_location(mut self, with_location: bool) -> Self {
        self.with_location = with_location;
        self
    }
}

impl Default for BracketedFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let now = chrono::Utc::now();
        write!(writer, "[{}] [{:5}] ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"), metadata.level())?;

        let spans: Vec<&str> = ctx
            .event_scope()
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();
        if spans.is_empty() {
            let tail = metadata.target().rsplit("::").next().unwrap_or("unknown");
            write!(writer, "[{}] ", tail)?;
        } else {
            write!(writer, "[{}] ", spans.join(">"))?;
        }

        match (self.with_location, metadata.file(), metadata.line()) {
            (true, Some(file), Some(line)) => {
                write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?
            }
            _ => write!(writer, "[{}]: ", metadata.target())?,
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(formatter: BracketedFormatter, f: impl FnOnce()) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(formatter)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_event_outside_span_uses_target_tail() {
        let out = capture(BracketedFormatter::new(), || {
            tracing::warn!("frame directory missing")
        });
        assert!(out.contains("[WARN ] [tests] "));
        assert!(out.trim_end().ends_with("frame directory missing"));
        assert!(out.contains("formatter.rs:"));
    }

    #[test]
    fn test_nested_spans_are_joined_root_first() {
        let out = capture(BracketedFormatter::new(), || {
            let outer = tracing::info_span!("load");
            let _outer = outer.enter();
            let inner = tracing::info_span!("load_video");
            let _inner = inner.enter();
            tracing::info!("parsed");
        });
        assert!(out.contains("[INFO ] [load>load_video] "));
    }

    #[test]
    fn test_location_can_be_hidden() {
        let out = capture(BracketedFormatter::new().with_location(false), || {
            tracing::info!("no location")
        });
        assert!(!out.contains("formatter.rs:"));
        assert!(out.contains("[visdrone_sot_loader::logging::formatter::tests]: no location"));
    }
}
