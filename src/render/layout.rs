//! The per-source-line column-painting pass and the annotation state
//! machine (spec.md §4.5.2, §4.5.3).

use crate::message::{InlineAnnotation, InlineKind};

use super::gutter::{empty_gutter, gutter_width, numbered_gutter};

/// Per-annotation bookkeeping carried across the single pass over source
/// lines. Indexed in parallel with the `inline_messages` slice, which is
/// already sorted by `(line_number, column_number)` — that sort order is
/// also our deterministic tie-break for equal-priority, same-column
/// annotations (spec.md §4.5.4, earlier wins).
struct AnnState {
    origin_line: i32,
    column: i32,
    remaining: i64,
    kind: InlineKind,
    has_text: bool,
    started: bool,
    done: bool,
    /// 1-based column at which underlining finished, once known.
    final_col: Option<usize>,
    /// Set once this annotation's legend line has been emitted.
    legend_emitted: bool,
}

impl AnnState {
    fn new(ann: &InlineAnnotation<'_>) -> Self {
        Self {
            origin_line: ann.location.line_number,
            column: ann.location.column_number,
            remaining: ann.location.length as i64,
            kind: ann.kind,
            has_text: ann.text.is_some(),
            started: false,
            done: false,
            final_col: None,
            legend_emitted: false,
        }
    }

    fn active(&self) -> bool {
        self.started && !self.done
    }
}

struct Finisher {
    index: usize,
    final_col: usize,
}

/// Render the inline source/underline/legend block for one set of
/// `inline_messages`, already split into source lines by the caller.
///
/// `current_line` is the effective first line number (the primary
/// location's `line_number`); `src_lines` is `location.lines` split on
/// `'\n'` with trailing empties dropped.
pub(super) fn render_block(
    out: &mut String,
    src_lines: &[&str],
    current_line: i32,
    annotations: &[InlineAnnotation<'_>],
) {
    let max_line = current_line + src_lines.len() as i32 - 1;
    let width = gutter_width(max_line);

    out.push_str(&empty_gutter(width));
    out.push('\n');

    let mut states: Vec<AnnState> = annotations.iter().map(AnnState::new).collect();

    for (i, line) in src_lines.iter().enumerate() {
        let n = current_line + i as i32;

        out.push_str(&numbered_gutter(n, width));
        out.push_str(line);
        out.push('\n');

        // Activate annotations whose origin line is this one.
        for state in &mut states {
            if !state.started && state.origin_line == n {
                state.started = true;
            }
        }

        if !states.iter().any(AnnState::active) {
            continue;
        }

        let line_len = line.chars().count();
        let mut track: Vec<char> = vec![' '; line_len];
        // (start column, this-line length) per active annotation, computed
        // once so painting and bookkeeping agree.
        let mut spans: Vec<Option<(usize, usize)>> = vec![None; states.len()];

        for (idx, state) in states.iter().enumerate() {
            if !state.active() {
                continue;
            }
            let start = if state.origin_line == n {
                state.column.max(1) as usize
            } else {
                1
            };
            let avail = (line_len as i64 - start as i64 + 1).max(0);
            let this_line_len = state.remaining.min(avail).max(0) as usize;
            spans[idx] = Some((start, this_line_len));
        }

        for col in 1..=line_len {
            let mut winner: Option<usize> = None;
            for (idx, span) in spans.iter().enumerate() {
                let Some((start, len)) = span else { continue };
                if col < *start || col >= start + len {
                    continue;
                }
                match winner {
                    None => winner = Some(idx),
                    Some(w) if states[idx].kind > states[w].kind => winner = Some(idx),
                    _ => {}
                }
            }
            if let Some(w) = winner {
                track[col - 1] = states[w].kind.glyph();
            }
        }

        let mut finishers: Vec<Finisher> = Vec::new();
        for (idx, state) in states.iter_mut().enumerate() {
            let Some((start, this_line_len)) = spans[idx] else {
                continue;
            };
            state.remaining -= this_line_len as i64;
            let finished_col = start + this_line_len;
            if state.remaining <= 0 {
                state.done = true;
                state.final_col = Some(finished_col.saturating_sub(1).max(1));
                if state.has_text {
                    finishers.push(Finisher {
                        index: idx,
                        final_col: state.final_col.unwrap(),
                    });
                }
            }
        }

        out.push_str(&empty_gutter(width));
        let track_str: String = track.into_iter().collect();
        out.push_str(track_str.trim_end());
        out.push('\n');

        finishers.sort_by_key(|f| f.final_col);
        for i in 0..finishers.len() {
            let text = annotations[finishers[i].index]
                .text
                .as_ref()
                .expect("finisher always has text");

            // Connectors for every annotation still pending after this one,
            // including this one's own bar at its finishing column.
            let max_col = finishers[i..].iter().map(|f| f.final_col).max().unwrap();
            let mut row: Vec<char> = vec![' '; max_col];
            for f in &finishers[i..] {
                row[f.final_col - 1] = '|';
            }

            // The tail starts right after this annotation's own bar and
            // overwrites whatever was there, but connectors past the tail's
            // reach survive (spec.md §4.5.2 step 5: only "the final `|`" —
            // this one's — is replaced).
            let current_col = finishers[i].final_col;
            let tail: Vec<char> = format!("-- {}", text.render()).chars().collect();
            let splice_start = current_col;
            let splice_end = splice_start + tail.len();
            if row.len() < splice_end {
                row.resize(splice_end, ' ');
            }
            row[splice_start..splice_end].copy_from_slice(&tail);

            let row_str: String = row.into_iter().collect();
            out.push_str(&empty_gutter(width));
            out.push_str(row_str.trim_end());
            out.push('\n');
            states[finishers[i].index].legend_emitted = true;
        }
    }

    out.push_str(&empty_gutter(width));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;
    use crate::text::DiagnosticText;

    fn ann(line: i32, col: i32, len: u32, kind: InlineKind, text: Option<&'static str>) -> InlineAnnotation<'static> {
        InlineAnnotation {
            location: SourceLocation::new("/f.cc", "", line, col, len),
            kind,
            text: text.map(DiagnosticText::plain),
        }
    }

    #[test]
    fn single_line_basic_underline() {
        let anns = vec![ann(5, 10, 4, InlineKind::Basic, Some("inline message here"))];
        let mut out = String::new();
        render_block(&mut out, &["  source code line here"], 5, &anns);
        assert_eq!(
            out,
            "  |\n5 |  source code line here\n  |         ~~~~\n  |            |-- inline message here\n  |\n"
        );
    }

    #[test]
    fn multi_line_underline() {
        let anns = vec![ann(55, 20, 20, InlineKind::Basic, Some("inline message here"))];
        let mut out = String::new();
        render_block(
            &mut out,
            &["  source code line '''", "multilinetoken", "''' here"],
            55,
            &anns,
        );
        assert_eq!(
            out,
            concat!(
                "   |\n",
                "55 |  source code line '''\n",
                "   |                   ~~~\n",
                "56 |multilinetoken\n",
                "   |~~~~~~~~~~~~~~\n",
                "57 |''' here\n",
                "   |~~~\n",
                "   |  |-- inline message here\n",
                "   |\n",
            )
        );
    }

    #[test]
    fn overlapping_annotations_higher_priority_wins() {
        let anns = vec![
            ann(1, 5, 6, InlineKind::Basic, Some("A")),
            ann(1, 8, 6, InlineKind::Emphasis, Some("B")),
        ];
        let mut out = String::new();
        render_block(&mut out, &["0123456789012345"], 1, &anns);
        let lines: Vec<&str> = out.lines().collect();
        // track line is lines[2] (after gutter + source line)
        let track = lines[2];
        let track_glyphs = &track[track.find('|').unwrap() + 1..];
        assert_eq!(&track_glyphs[4..7], "~~~"); // columns 5-7: A only
        assert_eq!(&track_glyphs[7..13], "^^^^^^"); // columns 8-13: B wins / B only
    }

    /// spec.md §4.5.4 scenario S4: two legend lines, the earliest-finishing
    /// annotation's line first, each line's pending connectors truncated at
    /// its own tail.
    #[test]
    fn spec_s4_overlap_legend_order() {
        let anns = vec![
            ann(1, 5, 6, InlineKind::Basic, Some("A")),
            ann(1, 8, 6, InlineKind::Emphasis, Some("B")),
        ];
        let mut out = String::new();
        render_block(&mut out, &["0123456789012345"], 1, &anns);
        assert_eq!(
            out,
            concat!(
                "  |\n",
                "1 |0123456789012345\n",
                "  |    ~~~^^^^^^\n",
                "  |         |-- A\n",
                "  |            |-- B\n",
                "  |\n",
            )
        );
    }

    /// Two annotations finishing far apart on the same line: the first
    /// annotation's legend line must still show a `|` connector pointing
    /// down to the second, since the tail doesn't reach that far
    /// (spec.md §4.5.2 step 5).
    #[test]
    fn distant_finishers_keep_pending_connector() {
        let anns = vec![
            ann(1, 1, 1, InlineKind::Basic, Some("A")),
            ann(1, 10, 1, InlineKind::Basic, Some("B")),
        ];
        let mut out = String::new();
        render_block(&mut out, &["0123456789"], 1, &anns);
        assert_eq!(
            out,
            concat!(
                "  |\n",
                "1 |0123456789\n",
                "  |~        ~\n",
                "  ||-- A    |\n",
                "  |         |-- B\n",
                "  |\n",
            )
        );
    }

    #[test]
    fn no_text_annotation_has_no_legend_line() {
        let anns = vec![ann(1, 1, 3, InlineKind::Emphasis, None)];
        let mut out = String::new();
        render_block(&mut out, &["abc"], 1, &anns);
        assert_eq!(out, "  |\n1 |abc\n  |^^^\n  |\n");
    }

    #[test]
    fn clipped_underline_at_line_end() {
        // length extends past the visible line; renderer clips silently.
        let anns = vec![ann(1, 3, 100, InlineKind::Basic, None)];
        let mut out = String::new();
        render_block(&mut out, &["abcde"], 1, &anns);
        assert_eq!(out, "  |\n1 |abcde\n  |  ~~~\n  |\n");
    }

    #[test]
    fn context_kind_paints_nothing_but_still_legends() {
        let anns = vec![ann(1, 1, 3, InlineKind::Context, Some("context note"))];
        let mut out = String::new();
        render_block(&mut out, &["abc"], 1, &anns);
        assert_eq!(out, "  |\n1 |abc\n  |\n  |  |-- context note\n  |\n");
    }
}
