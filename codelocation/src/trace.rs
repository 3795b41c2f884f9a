use backtrace::{Backtrace, BacktraceFrame, BacktraceSymbol};

/// Render the current call stack in the two-lines-per-frame format expected
/// by [`prune`](crate::prune).
///
/// The first frame is `stack_trace` itself, so `prune_with(&stack_trace(),
/// 0, ..)` starts at the function that called `stack_trace`.
#[inline(never)]
pub fn stack_trace() -> String {
    let trace = Backtrace::new();

    let start = find_frame(&trace, stack_trace as usize, "stack_trace").unwrap_or(0);

    render(&symbols(&trace.frames()[start..]))
}

/// Render a captured backtrace in the two-lines-per-frame format expected by
/// [`prune`](crate::prune).
///
/// Each frame becomes an identifier line holding the demangled function name
/// and a location line of the form `\tfile:line`. Inlined functions get a
/// frame of their own. An unresolved backtrace is resolved on a copy first.
pub fn format_backtrace(trace: &Backtrace) -> String {
    let needs_resolving = trace
        .frames()
        .iter()
        .any(|frame| frame.symbols().is_empty());

    if needs_resolving {
        let mut trace = trace.clone();
        trace.resolve();
        render(&symbols(trace.frames()))
    } else {
        render(&symbols(trace.frames()))
    }
}

/// The index of the innermost frame running the function that starts at
/// `address`.
///
/// Falls back to comparing symbol names where the unwinder can't report
/// function addresses (Apple targets). `name` is the function's own name;
/// depending on the debug info level, the symbol is either that bare name or
/// a full path ending in `::name`.
pub(crate) fn find_frame(trace: &Backtrace, address: usize, name: &str) -> Option<usize> {
    let frames = trace.frames();

    frames
        .iter()
        .position(|frame| address != 0 && frame.symbol_address() as usize == address)
        .or_else(|| {
            let suffix = format!("::{name}");

            frames.iter().position(|frame| {
                frame.symbols().iter().any(|symbol| {
                    let symbol_name = symbol_name(symbol);
                    symbol_name == name || symbol_name.ends_with(&suffix)
                })
            })
        })
}

pub(crate) fn symbols(frames: &[BacktraceFrame]) -> Vec<&BacktraceSymbol> {
    frames.iter().flat_map(|frame| frame.symbols()).collect()
}

fn symbol_name(symbol: &BacktraceSymbol) -> String {
    symbol
        .name()
        .map_or_else(|| String::from("<unknown>"), |name| format!("{name:#}"))
}

fn render(symbols: &[&BacktraceSymbol]) -> String {
    symbols
        .iter()
        .map(|symbol| {
            let file = symbol.filename().map_or_else(
                || String::from("<unknown>"),
                |path| path.to_string_lossy().into_owned(),
            );

            format!(
                "{}\n\t{}:{}",
                symbol_name(symbol),
                file,
                symbol.lineno().unwrap_or(0)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
