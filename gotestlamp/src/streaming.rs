use std::io::BufRead;

use crate::format::go_test_json::{GoTestJsonStreamParser, GoTestStreamUpdate, decode_event_line};
use crate::live_progress::LiveProgress;
use crate::test_model::TestEvent;

fn normalize_crlf_line(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Decoded-or-skipped view over a line stream. Undecodable lines yield `None`.
pub fn decode_go_test_lines(reader: impl BufRead) -> impl Iterator<Item = Option<TestEvent>> {
    // Invalid UTF-8 degrades to replacement characters; the stream keeps going.
    let lines = reader.split(b'\n').map_while(|read| {
        read.map_err(|err| tracing::warn!(%err, "stopped reading test event stream"))
            .ok()
    });
    lines.map(|bytes| {
        let line = String::from_utf8_lossy(&bytes);
        decode_event_line(normalize_crlf_line(&line))
    })
}

/// Lazily decodes `go test -json` records, dropping lines that are not test events.
pub fn decode_go_test_events(reader: impl BufRead) -> impl Iterator<Item = TestEvent> {
    decode_go_test_lines(reader).flatten()
}

pub fn consume_go_test_stream(
    reader: impl BufRead,
    progress: &mut LiveProgress,
) -> GoTestJsonStreamParser {
    let mut parser = GoTestJsonStreamParser::new();
    for decoded in decode_go_test_lines(reader) {
        let update = match decoded {
            Some(event) => parser.push_event(event),
            None => {
                parser.note_skipped_line();
                None
            }
        };
        if let Some(GoTestStreamUpdate {
            package,
            test_name,
            passed,
            tests_processed,
        }) = update
        {
            tracing::trace!(%package, test = %test_name, passed, "test finished");
            progress.on_test_finished(tests_processed);
        }
    }
    progress.finish();
    tracing::debug!(
        tests_processed = parser.tests_processed(),
        skipped_lines = parser.skipped_lines(),
        "test event stream closed"
    );
    parser
}
