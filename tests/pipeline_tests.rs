use pretty_assertions::assert_eq;
use samplestat::sampler::Address;
use samplestat::{
    AcceptAll, MemorySampler, ProfileError, Profiler, ResolveError, StackFrame, SymbolResolver,
    SymbolTable,
};

/// Symbol table that records every lookup
struct CountingResolver {
    table: SymbolTable,
    calls: usize,
}

impl SymbolResolver for CountingResolver {
    fn resolve(&mut self, address: Address) -> Result<Vec<StackFrame>, ResolveError> {
        self.calls += 1;
        self.table.resolve(address)
    }
}

fn resolver() -> CountingResolver {
    CountingResolver {
        table: SymbolTable::new()
            .with(0x1, StackFrame::new("leaf", "src/leaf.rs", 10))
            .with(0x2, StackFrame::new("middle", "src/middle.rs", 20))
            .with(0x3, StackFrame::new("main", "src/main.rs", 30))
            .with(0x4, StackFrame::native("__libc_start_main")),
        calls: 0,
    }
}

fn profiler() -> Profiler<MemorySampler, CountingResolver> {
    let mut sampler = MemorySampler::with_capacity(1024);
    sampler.record(&[0x1, 0x2, 0x3, 0x4]);
    sampler.record(&[0x2, 0x3, 0x4]);
    sampler.record(&[0x1, 0x3]);
    Profiler::new(sampler, resolver())
}

#[test]
fn test_backtraces_split_buffer() {
    let mut profiler = profiler();
    let backtraces = profiler.backtraces(true).unwrap();

    assert_eq!(
        backtraces,
        vec![vec![0x1, 0x2, 0x3, 0x4], vec![0x2, 0x3, 0x4], vec![0x1, 0x3]]
    );
}

#[test]
fn test_stacktraces_drop_native_frames() {
    let mut profiler = profiler();
    let traces = profiler.stacktraces(true).unwrap();

    assert_eq!(traces.len(), 3);
    assert!(traces.iter().flatten().all(|frame| !frame.is_native));
    assert_eq!(traces[1].len(), 2);
}

#[test]
fn test_one_lookup_per_distinct_address() {
    let mut profiler = profiler();
    profiler.stacktraces(true).unwrap();

    assert_eq!(profiler.resolver().calls, 4);
}

#[test]
fn test_stacktraces_are_cached() {
    let mut profiler = profiler();
    let first = profiler.stacktraces(true).unwrap().to_vec();
    let second = profiler.stacktraces(true).unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(profiler.resolver().calls, 4);
}

#[test]
fn test_clear_forces_resolution() {
    let mut profiler = profiler();
    profiler.stacktraces(true).unwrap();
    profiler.clear();
    assert!(profiler.cache().is_empty());

    profiler.stacktraces(true).unwrap();
    assert_eq!(profiler.resolver().calls, 8);
}

#[test]
fn test_new_samples_refresh_cache() {
    let mut profiler = profiler();
    assert_eq!(profiler.stacktraces(true).unwrap().len(), 3);

    profiler.sampler_mut().record(&[0x3]);
    let traces = profiler.stacktraces(true).unwrap();

    assert_eq!(traces.len(), 4);
    assert_eq!(profiler.resolver().calls, 8);
}

#[test]
fn test_bare_fetch_does_not_desync_cache() {
    let mut profiler = profiler();
    profiler.stacktraces(true).unwrap();

    // New data observed only through fetch; the cache still holds the old buffer
    profiler.sampler_mut().record(&[0x2]);
    assert!(profiler.fetch().unwrap().is_new);

    let traces = profiler.stacktraces(true).unwrap();
    assert_eq!(traces.len(), 4);
}

#[test]
fn test_full_buffer_is_processed() {
    let mut sampler = MemorySampler::with_capacity(7);
    sampler.record(&[0x1, 0x3]);
    sampler.record(&[0x2, 0x3]);
    sampler.record(&[0x1]);

    let mut profiler = Profiler::new(sampler, resolver());
    let fetch = profiler.fetch().unwrap();
    assert!(fetch.is_full);

    // Only the first address of the third sample fit, without its sentinel
    let traces = profiler.stacktraces(true).unwrap();
    assert_eq!(traces.len(), 2);
}

#[test]
fn test_unresolved_address_fails_and_keeps_cache() {
    let mut profiler = profiler();
    profiler.stacktraces(true).unwrap();

    profiler.sampler_mut().record(&[0x99]);
    let err = profiler.stacktraces(true).unwrap_err();

    assert!(matches!(err, ProfileError::Resolve(ResolveError::Unresolved(0x99))));
    assert_eq!(profiler.cache().entry().map(|e| e.stacktraces.len()), Some(3));
}

#[test]
fn test_own_and_total_time() {
    let mut profiler = profiler();

    let own = profiler.own_time(&AcceptAll, true).unwrap();
    assert_eq!(own.total(), 3);
    assert_eq!(own[0].0.function, "leaf");
    assert_eq!(own[0].1, 2);

    let total = profiler.total_time(&AcceptAll, true).unwrap();
    assert_eq!(total.total(), 3);
    assert_eq!(total[0].0.function, "main");
    assert_eq!(total[0].1, 3);

    assert_eq!(profiler.resolver().calls, 4);
}

#[test]
fn test_cache_can_seed_another_session() {
    let mut first = profiler();
    first.stacktraces(true).unwrap();
    let cache = first.into_cache();

    let mut sampler = MemorySampler::with_capacity(1024);
    sampler.record(&[0x1, 0x2, 0x3, 0x4]);
    sampler.record(&[0x2, 0x3, 0x4]);
    sampler.record(&[0x1, 0x3]);
    let mut second = Profiler::with_cache(sampler, resolver(), cache);

    // A fresh reader reports new data, so the cache is not trusted
    second.stacktraces(true).unwrap();
    assert_eq!(second.resolver().calls, 4);
    second.stacktraces(true).unwrap();
    assert_eq!(second.resolver().calls, 4);
}
