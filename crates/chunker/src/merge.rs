use crate::classify::NodeClassifier;
use crate::types::{ChunkCandidate, Fragment, FragmentKind};

/// Fold a fragment list into budget-bounded chunk candidates
///
/// Two-slot state machine: `current` is the chunk being grown, `pending`
/// buffers gaps until they can attach to a neighbor. Closing syntax attaches
/// backward to the open chunk; every other gap attaches forward to the next
/// wanted fragment. The walk is inherently sequential, so fragments are
/// sorted by offset first and the output stays ascending by start offset.
pub(crate) fn re_merge(
    mut fragments: Vec<Fragment>,
    source: &str,
    classifier: &NodeClassifier,
    target_chunk_tokens: usize,
) -> Vec<ChunkCandidate> {
    fragments.sort_by_key(|fragment| (fragment.start_byte, fragment.end_byte));

    let mut output: Vec<ChunkCandidate> = Vec::new();
    let mut current: Option<ChunkCandidate> = None;
    let mut pending: Option<ChunkCandidate> = None;

    for fragment in fragments {
        let kind = fragment.kind;
        let candidate = ChunkCandidate::from_fragment(fragment);

        match kind {
            FragmentKind::Gap => {
                let text = &source[candidate.start_byte..candidate.end_byte];
                match current.take() {
                    // Trailing punctuation and closing tags belong to the
                    // chunk they close.
                    Some(open) if classifier.is_closing_syntax(text) => {
                        let open = match pending.take() {
                            Some(gap) => open.merge(gap),
                            None => open,
                        };
                        current = Some(open.merge(candidate));
                    }
                    // Deferred: the gap will prepend to whichever wanted
                    // fragment comes next.
                    open => {
                        current = open;
                        pending = Some(match pending.take() {
                            Some(gap) => gap.merge(candidate),
                            None => candidate,
                        });
                    }
                }
            }
            FragmentKind::Wanted => {
                let next = match pending.take() {
                    Some(gap) => gap.merge(candidate),
                    None => candidate,
                };
                current = Some(match current.take() {
                    None => next,
                    Some(open) => merge_or_flush(open, next, target_chunk_tokens, &mut output),
                });
            }
        }
    }

    if let Some(open) = current {
        let open = match pending {
            Some(gap) => open.merge(gap),
            None => open,
        };
        output.push(open);
    }
    // A trailing pending gap with no open chunk produces nothing: a file
    // with no wanted fragments yields no chunks.

    output
}

/// Budget policy: keep growing `open` while both pieces fit under the soft
/// target, otherwise flush it and start fresh from `next`
fn merge_or_flush(
    open: ChunkCandidate,
    next: ChunkCandidate,
    target: usize,
    output: &mut Vec<ChunkCandidate>,
) -> ChunkCandidate {
    if open.token_count > target || next.token_count > target {
        output.push(open);
        return next;
    }
    if open.token_count.saturating_add(next.token_count) <= target {
        return open.merge(next);
    }
    output.push(open);
    next
}
