use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Custom formatter that wraps each field in brackets for better readability.
/// Format: [TIMESTAMP] [LEVEL] [SPAN] [TARGET: FILE:LINE]: MESSAGE
///
/// The timestamp is local time without a zone suffix.
pub struct BracketedFormatter;

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
        // Get metadata
        let metadata = event.metadata();

        // Write timestamp in brackets
        let now = chrono::Local::now();
        write!(writer, "[{}]  ", now.format("%Y-%m-%dT%H:%M:%S%.6f"))?;

        // Write level in brackets
        write!(writer, "[{:5}] ", metadata.level())?;

        // Innermost span name (e.g. the pair being loaded), or the last
        // path segment of the target when the event is outside any span
        let scope_name = match ctx.event_scope() {
            Some(scope) => scope.from_root().last().map(|span| span.name()),
            None => metadata.target().rsplit("::").next(),
        };
        write!(writer, "[{}] ", scope_name.unwrap_or("unknown"))?;

        // Write target and location in brackets
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?;
        } else {
            write!(writer, "[{}]: ", metadata.target())?;
        }

        // Write the message
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::{info, info_span};

    #[derive(Clone)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = CaptureWriter(buffer.clone());
        let subscriber = tracing_subscriber::fmt()
            .event_format(BracketedFormatter)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_bracketed_line_inside_span() {
        let output = capture(|| {
            let span = info_span!("load_pair");
            let _guard = span.enter();
            info!("pairs found: {}", 3);
        });

        assert!(output.contains("[INFO"));
        assert!(output.contains("[load_pair] "));
        assert!(output.contains("formatter.rs:"));
        assert!(output.trim_end().ends_with("pairs found: 3"));
    }

    #[test]
    fn test_falls_back_to_target_without_span() {
        let output = capture(|| info!("no span"));
        // target is this module path, last segment is "tests"
        assert!(output.contains("[tests] "));
    }
}
