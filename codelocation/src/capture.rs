use crate::{
    prune_with, stack_trace,
    trace::{find_frame, symbols},
    CodeLocation, Denylist,
};
use serde::{Deserialize, Serialize};

/// Something that can report the source location of a frame on the call
/// stack.
///
/// `depth` counts from the frame that called
/// [`capture_frame`](FrameSource::capture_frame): depth 0 is the caller
/// itself, depth 1 is the caller's caller, and so on. Returns `None` if no
/// such frame exists or it has no location information.
pub trait FrameSource {
    /// Look up the frame `depth` levels above the caller.
    fn capture_frame(&self, depth: usize) -> Option<CodeLocation>;
}

impl<F> FrameSource for F
where
    F: Fn(usize) -> Option<CodeLocation>,
{
    fn capture_frame(&self, depth: usize) -> Option<CodeLocation> {
        self(depth)
    }
}

/// Reads frames from the live call stack using the `backtrace` crate.
///
/// Requires debug info to report anything; without it every lookup returns
/// `None`. Inlined functions count as frames of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeFrames;

impl FrameSource for RuntimeFrames {
    #[inline(never)]
    fn capture_frame(&self, depth: usize) -> Option<CodeLocation> {
        let trace = backtrace::Backtrace::new();

        // Everything up to and including this function belongs to the unwinder
        let own = find_frame(
            &trace,
            <Self as FrameSource>::capture_frame as usize,
            "capture_frame",
        )?;

        let symbol = *symbols(&trace.frames()[own + 1..]).get(depth)?;

        Some(CodeLocation::new(
            symbol.filename()?.to_string_lossy(),
            symbol.lineno()?,
        ))
    }
}

/// Report the source location of a call `skip` frames above the caller of
/// `capture`.
///
/// `capture(0)` returns the location inside the immediate caller where
/// `capture` was invoked. Each increment of `skip` moves one frame further
/// up the stack. Internally this looks `skip + 1` frames above `capture`'s
/// own frame, which is never reported.
///
/// If the frame can't be resolved (because `skip` exceeds the stack depth or
/// there is no debug info), the zero-valued [`CodeLocation`] is returned.
#[inline(never)]
pub fn capture(skip: usize) -> CodeLocation {
    // Not a tail call, so this frame stays on the stack
    std::hint::black_box(capture_from(&RuntimeFrames, skip.saturating_add(1)))
}

/// Like [`capture`], but reading frames from `source`.
///
/// Looks up depth `skip + 1` in `source`; depth 0 would be `capture_from`
/// itself. Wrappers around `capture_from` should add one to `skip` for
/// their own frame, the same way [`capture`] does.
#[inline(never)]
pub fn capture_from<S: FrameSource + ?Sized>(source: &S, skip: usize) -> CodeLocation {
    let depth = skip.saturating_add(1);

    source.capture_frame(depth).unwrap_or_else(|| {
        log::debug!("no frame with location information at depth {depth}");
        CodeLocation::default()
    })
}

/// A captured location along with the stack that led to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackCapture {
    /// Where the capture happened, as [`capture`] reports it.
    pub location: CodeLocation,

    /// The call stack from that location outwards, pruned with
    /// [`Denylist::rust`].
    pub stack_trace: String,
}

/// Capture a location like [`capture`] does, together with the pruned stack
/// trace leading up to it.
///
/// The first frame of the returned trace is the frame the location points
/// into, unless the denylist hides it.
#[inline(never)]
pub fn capture_with_stack_trace(skip: usize) -> StackCapture {
    let skip = skip.saturating_add(1);

    let location = capture_from(&RuntimeFrames, skip);

    // Also drops the frame of `stack_trace` itself
    let stack_trace = prune_with(&stack_trace(), skip, &Denylist::rust());

    StackCapture {
        location,
        stack_trace,
    }
}
