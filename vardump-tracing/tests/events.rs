use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use vardump::{DumpStyle, hooks::PrintSink};
use vardump_tracing::{Dumped, TracingSink, dump_event};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(max_level: Level, f: impl FnOnce()) -> String {
    let writer = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_max_level(max_level)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    writer.text()
}

#[test]
fn test_dumped_display() {
    let values = vec![1_i32, 2];
    assert_eq!(Dumped::new(&values).to_string(), "[i32]{ 1, 2 }");

    let nested = vec![vec![1_u8]];
    let pretty = Dumped::new(&nested).with_style(DumpStyle::PRINT).to_string();
    assert_eq!(pretty, "[Vec<u8>]{\n  [u8]{ 1 },\n}");
}

#[test]
fn test_dump_event_fields() {
    let output = capture(Level::TRACE, || dump_event(Level::INFO, &vec!["a"]));
    assert!(output.contains("INFO"), "{output}");
    assert!(output.contains("vardump"), "{output}");
    assert!(output.contains("dump=[&str]{ \"a\" }"), "{output}");
}

#[test]
fn test_dump_event_respects_level_filter() {
    let output = capture(Level::INFO, || dump_event(Level::DEBUG, &5_u8));
    assert!(output.is_empty(), "{output}");
}

#[test]
fn test_tracing_sink() {
    let output = capture(Level::DEBUG, || TracingSink.write_print("[DEBUG PRINT]\n7\n"));
    assert!(output.contains("DEBUG"), "{output}");
    assert!(output.contains("[DEBUG PRINT]"), "{output}");
}
