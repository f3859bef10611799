use std::io::{BufReader, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use crate::live_progress::LiveProgress;
use crate::streaming::{consume_go_test_stream, decode_go_test_events, decode_go_test_lines};

#[test]
fn decode_lines_marks_non_event_lines_as_none() {
    let input = "\
=== RUN   TestFoo
{\"Action\":\"run\",\"Package\":\"p\",\"Test\":\"TestFoo\"}\r
not json at all
{\"Action\":\"pass\",\"Package\":\"p\",\"Test\":\"TestFoo\",\"Elapsed\":0.5}
";
    let decoded = decode_go_test_lines(Cursor::new(input)).collect::<Vec<_>>();
    assert_eq!(decoded.len(), 4);
    assert!(decoded[0].is_none());
    assert_eq!(decoded[1].as_ref().map(|e| e.action.as_str()), Some("run"));
    assert!(decoded[2].is_none());
    assert_eq!(decoded[3].as_ref().and_then(|e| e.elapsed), Some(0.5));
}

#[test]
fn invalid_utf8_does_not_end_the_stream() {
    let mut input = b"{\"Action\":\"output\",\"Package\":\"p\",\"Output\":\"\xff\"}\n".to_vec();
    input.extend_from_slice(b"{\"Action\":\"pass\",\"Package\":\"p\",\"Test\":\"TestA\"}\n");
    let events = decode_go_test_events(Cursor::new(input)).collect::<Vec<_>>();
    assert_eq!(events.last().map(|e| e.action.as_str()), Some("pass"));
}

#[test]
fn consume_counts_skipped_lines_and_processed_tests() {
    let input = "\
garbage
{\"Action\":\"pass\",\"Package\":\"p\",\"Test\":\"TestA\"}
{\"Action\":\"fail\",\"Package\":\"p\",\"Test\":\"TestB/sub\"}
{\"Action\":\"fail\",\"Package\":\"p\",\"Elapsed\":0.3}
";
    let mut progress = LiveProgress::off();
    let parser = consume_go_test_stream(Cursor::new(input), &mut progress);
    assert_eq!(parser.skipped_lines(), 1);
    assert_eq!(parser.tests_processed(), 2);

    let summary = parser.finalize();
    assert_eq!(summary.counters.tests_passed, 1);
    assert_eq!(summary.counters.tests_failed, 1);
    assert_eq!(summary.counters.suites_failed, 1);
}

#[test]
fn consume_empty_input_yields_empty_summary() {
    let mut progress = LiveProgress::off();
    let summary = consume_go_test_stream(Cursor::new(""), &mut progress).finalize();
    assert!(summary.packages.is_empty());
    assert_eq!(summary.counters.suites_total(), 0);
    assert!(summary.success());
}

struct BrokenPipe;

impl Read for BrokenPipe {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "upstream went away",
        ))
    }
}

#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn read_error_keeps_earlier_events_and_logs_a_warning() {
    let input = "\
{\"Action\":\"pass\",\"Package\":\"p\",\"Test\":\"TestA\"}
{\"Action\":\"fail\",\"Package\":\"p\",\"Test\":\"TestB\"}
";
    let reader = BufReader::new(Cursor::new(input).chain(BrokenPipe));
    let logs = LogBuf::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let parser = tracing::subscriber::with_default(subscriber, || {
        consume_go_test_stream(reader, &mut LiveProgress::off())
    });

    assert_eq!(parser.tests_processed(), 2);
    let summary = parser.finalize();
    assert_eq!(summary.counters.tests_passed, 1);
    assert_eq!(summary.counters.tests_failed, 1);

    let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("stopped reading test event stream"), "{logged}");
    assert!(logged.contains("upstream went away"), "{logged}");
    assert!(logged.contains("test=TestB passed=false"), "{logged}");
}
