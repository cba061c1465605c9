use distla_logging::{clear_log_hook, init_logging, set_log_hook, LogRecord, LoggingOptions};
use parking_lot::Mutex;
use serial_test::serial;
use std::sync::Arc;

fn capture() -> Arc<Mutex<Vec<LogRecord>>> {
    let captured: Arc<Mutex<Vec<LogRecord>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    set_log_hook(move |rec: &LogRecord| sink.lock().push(rec.clone()));
    captured
}

fn quiet_options() -> LoggingOptions {
    LoggingOptions {
        default_filter: "warn".into(),
        stderr: false,
    }
}

#[test]
#[serial]
fn log_hook_receives_tracing_events() {
    let captured = capture();
    let _guard = init_logging(quiet_options());

    tracing::warn!(routine = "pzheevd", arity = 18, "native call failed");

    let items = captured.lock();
    let record = items
        .iter()
        .find(|r| r.message.contains("native call failed"))
        .expect("record delivered");
    assert_eq!(record.level, "WARN");
    let fields = record.fields.as_ref().expect("fields recorded");
    assert_eq!(fields["routine"], "pzheevd");
    assert_eq!(fields["arity"], 18);
    drop(items);
    clear_log_hook();
}

#[test]
#[serial]
fn log_facade_records_keep_their_target() {
    let captured = capture();
    let _guard = init_logging(quiet_options());

    log::warn!(target: "distla_lowlevel::invoke", "pzheevd: workspace query returned status -2");

    let items = captured.lock();
    let record = items
        .iter()
        .find(|r| r.message.contains("workspace query returned status -2"))
        .expect("bridged record delivered");
    assert_eq!(record.target, "distla_lowlevel::invoke");
    assert!(record.fields.is_none());
    drop(items);
    clear_log_hook();
}

#[test]
#[serial]
fn cleared_hook_receives_nothing() {
    let captured = capture();
    let _guard = init_logging(quiet_options());
    clear_log_hook();

    tracing::error!("after clear");

    assert!(captured.lock().iter().all(|r| r.message != "after clear"));
}
