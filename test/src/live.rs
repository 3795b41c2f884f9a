use codelocation::{
    capture, capture_with_stack_trace, format_backtrace, prune_with, CodeLocation, Denylist,
    StackCapture,
};

fn assert_no_runtime_frames(trace: &str) {
    for identifier in trace.lines().step_by(2) {
        assert!(!identifier.starts_with("codelocation::"), "{trace}");
        assert!(!identifier.starts_with("test::"), "{trace}");
        assert!(!identifier.starts_with("std::rt::"), "{trace}");
        assert!(!identifier.contains("__rust_begin_short_backtrace"), "{trace}");
    }
}

#[inline(never)]
fn expect_positive(value: i32) -> Option<CodeLocation> {
    if value > 0 {
        None
    } else {
        // Report the caller of `expect_positive`, not this line
        Some(std::hint::black_box(capture(1)))
    }
}

#[test]
fn test_failure_points_at_call_site() {
    let (failure, line) = (expect_positive(-1), line!());

    let failure = failure.expect("expected a failure");

    assert!(failure.file_name.ends_with("live.rs"), "{failure}");
    assert_eq!(failure.line_number, line);
    assert_eq!(failure.to_string(), format!("{}:{line}", failure.file_name));
}

#[inline(never)]
fn fail_here() -> (StackCapture, u32) {
    (std::hint::black_box(capture_with_stack_trace(0)), line!())
}

#[test]
fn test_capture_with_stack_trace() {
    let (capture, line) = fail_here();

    assert_eq!(capture.location.line_number, line);

    let lines = capture.stack_trace.lines().collect::<Vec<_>>();

    assert!(lines[0].ends_with("fail_here"), "{}", capture.stack_trace);
    assert!(lines[1].ends_with(&format!(":{line}")), "{}", capture.stack_trace);
    assert!(
        lines
            .iter()
            .step_by(2)
            .any(|line| line.contains("test_capture_with_stack_trace")),
        "{}",
        capture.stack_trace
    );

    assert_no_runtime_frames(&capture.stack_trace);
}

#[test]
fn test_format_and_prune_backtrace() {
    let trace = backtrace::Backtrace::new_unresolved();

    let pruned = prune_with(&format_backtrace(&trace), 0, &Denylist::rust());

    assert!(
        pruned.contains("test_format_and_prune_backtrace"),
        "{pruned}"
    );

    assert_no_runtime_frames(&pruned);
}

#[inline(never)]
fn located() -> (CodeLocation, u32) {
    (std::hint::black_box(capture(0)), line!())
}

#[test]
fn test_capture_from_threads() {
    let handles = (0..4)
        .map(|_| std::thread::spawn(located))
        .collect::<Vec<_>>();

    for handle in handles {
        let (location, line) = handle.join().unwrap();

        assert!(location.file_name.ends_with("live.rs"), "{location}");
        assert_eq!(location.line_number, line);
    }
}
