use pretty_assertions::assert_eq;
use samplestat::aggregator::{own_time, total_time, AcceptAll, FrameCounts};
use samplestat::{file_contains, StackFrame, StackTrace};

fn frame(name: &str, file: &str) -> StackFrame {
    StackFrame::new(name, file, 1)
}

fn traces() -> Vec<StackTrace> {
    let a = frame("a", "app/a.rs");
    let b = frame("b", "app/b.rs");
    let lib = frame("lib", "vendor/lib.rs");
    let main = frame("main", "app/main.rs");

    vec![
        StackTrace::new(vec![lib.clone(), a.clone(), main.clone()]),
        StackTrace::new(vec![a.clone(), b.clone(), a.clone(), main.clone()]),
        StackTrace::new(vec![b.clone(), main.clone()]),
        StackTrace::new(vec![lib.clone()]),
    ]
}

fn names(counts: &FrameCounts) -> Vec<(String, usize)> {
    counts
        .iter()
        .map(|(frame, count)| (frame.function.clone(), *count))
        .collect()
}

#[test]
fn test_own_time_attributes_leaf() {
    let own = own_time(&traces(), &AcceptAll);

    assert_eq!(own.total(), 4);
    assert_eq!(
        names(&own),
        vec![("lib".to_string(), 2), ("a".to_string(), 1), ("b".to_string(), 1)]
    );
}

#[test]
fn test_total_time_counts_once_per_sample() {
    let total = total_time(&traces(), &AcceptAll);

    assert_eq!(total.total(), 4);
    assert_eq!(
        names(&total),
        vec![
            ("main".to_string(), 3),
            ("lib".to_string(), 2),
            ("a".to_string(), 2),
            ("b".to_string(), 2),
        ]
    );
}

#[test]
fn test_own_time_with_file_filter() {
    let own = own_time(&traces(), &file_contains("app/"));

    // The lib-only trace is emptied but still counts toward the total
    assert_eq!(own.total(), 4);
    assert_eq!(
        names(&own),
        vec![("a".to_string(), 2), ("b".to_string(), 1)]
    );
    assert!(own.counts().sum::<usize>() < own.total());
}

#[test]
fn test_total_time_with_closure_filter() {
    let total = total_time(&traces(), &|f: &StackFrame| f.function != "main");

    assert_eq!(total.total(), 4);
    assert!(total.frames().all(|f| f.function != "main"));
}

#[test]
fn test_everything_filtered_out() {
    let reject = |_: &StackFrame| false;

    let own = own_time(&traces(), &reject);
    let total = total_time(&traces(), &reject);

    assert!(own.is_empty());
    assert!(total.is_empty());
    assert_eq!(own.total(), 4);
    assert_eq!(total.total(), 4);
}

#[test]
fn test_empty_input() {
    let own = own_time(&[], &AcceptAll);
    assert_eq!(own.total(), 0);
    assert!(own.is_empty());
    assert!(own.shares().is_empty());
}

#[test]
fn test_tie_order_is_reproducible() {
    let input = traces();
    let first = names(&total_time(&input, &AcceptAll));

    for _ in 0..20 {
        assert_eq!(names(&total_time(&input, &AcceptAll)), first);
    }
}

#[test]
fn test_percentages() {
    let total = total_time(&traces(), &AcceptAll);

    assert_eq!(total.percent(0), Some(75.0));
    let shares = total.shares();
    assert_eq!(shares.len(), 4);
    assert_eq!(shares[0].percent, 75);
    assert_eq!(shares[1].percent, 50);
}
