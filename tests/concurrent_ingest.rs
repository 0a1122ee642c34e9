use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tailsift::{LineStore, RenderOptions, RenderPipeline, Viewport};

const LINES: usize = 20_000;
const RENDERS: usize = 300;

/// Lines are `line <index>`, so a frame can be checked against the total it reports.
fn index_of(row: &str) -> usize {
    row.strip_prefix("line ")
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("unexpected row {row:?}"))
}

#[test]
fn renders_during_ingest_see_a_consistent_prefix() {
    let store = Arc::new(LineStore::with_capacity(LINES));
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..LINES {
                store.append(format!("line {i}"));
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let pipeline = RenderPipeline::new(RenderOptions {
        reserved_rows: 3,
        pad_reserve: None,
    });
    let viewport = Viewport::new(80, 13);
    let mut last_total = 0;

    for _ in 0..RENDERS {
        let frame = pipeline.render(&store, "", "> ", viewport);
        let total = frame.total_lines;

        // The status line reports the store length at the instant of the scan.
        assert!(frame
            .status_row()
            .unwrap()
            .contains(&format!("Total Lines: {total} ")));
        assert!(total >= last_total, "store length went backwards");
        last_total = total;

        // The window is exactly the newest lines of that same prefix, in order.
        let rows = frame.content_rows();
        assert_eq!(rows.len(), total.min(10));
        for (offset, row) in rows.iter().enumerate() {
            assert_eq!(index_of(row), total - rows.len() + offset);
        }

        if done.load(Ordering::SeqCst) {
            break;
        }
    }

    writer.join().unwrap();
    let frame = pipeline.render(&store, "", "> ", viewport);
    assert_eq!(frame.total_lines, LINES);
    assert_eq!(frame.content_rows().last().map(String::as_str), Some("line 19999"));
}

#[test]
fn filtered_renders_during_ingest_never_skip_matches() {
    let store = Arc::new(LineStore::with_capacity(LINES));

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..LINES {
                let tag = if i % 2 == 0 { "even" } else { "odd" };
                store.append(format!("line {i} {tag}"));
            }
        })
    };

    let pipeline = RenderPipeline::default();
    for _ in 0..RENDERS {
        let frame = pipeline.render(&store, "EVEN", "> EVEN", Viewport::new(80, 8));
        let indices: Vec<usize> = frame
            .content_rows()
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| {
                let trimmed = row.strip_suffix(" even").expect("only even lines match");
                index_of(trimmed)
            })
            .collect();

        // Consecutive even indices ending at the newest even line of the prefix.
        for pair in indices.windows(2) {
            assert_eq!(pair[1], pair[0] + 2);
        }
        if let Some(&newest) = indices.last() {
            assert!(newest < frame.total_lines);
            assert!(frame.total_lines - newest <= 2);
        }
    }

    writer.join().unwrap();
}
