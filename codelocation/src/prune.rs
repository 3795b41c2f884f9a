use crate::Denylist;

/// Remove the frames of the test framework and the runtime from a stack
/// trace, using the [default denylist](Denylist::default).
///
/// See [`prune_with`] for the format of `trace` and the meaning of `skip`.
pub fn prune(trace: &str, skip: usize) -> String {
    prune_with(trace, skip, crate::denylist::go_preset())
}

/// Remove every frame matching `denylist` from a stack trace.
///
/// `trace` holds two lines per frame: an identifier line naming the function,
/// followed by the frame's location line. The first `skip + 1` frames are
/// dropped before filtering; the extra frame is the one that produced the
/// trace, so `skip = 0` starts at its caller. A trace too short to skip that
/// many frames is filtered in full instead.
///
/// Only the identifier line is checked against `denylist`, and a frame is
/// always kept or dropped as a whole. An unpaired final line is discarded.
pub fn prune_with(trace: &str, skip: usize, denylist: &Denylist) -> String {
    let mut lines = trace.split('\n').collect::<Vec<_>>();

    let skipped = skip.saturating_add(1).saturating_mul(2);
    if lines.len() > skipped {
        lines.drain(..skipped);
    }

    lines
        .chunks_exact(2)
        .filter(|frame| match denylist.matching(frame[0]) {
            Some(category) => {
                log::trace!("hiding {category} frame `{}`", frame[0]);
                false
            }
            None => true,
        })
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}
