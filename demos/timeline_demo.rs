//! Example walking through an interweave sweep over a small project timeline.
//!
//! Run with: `cargo run --example timeline_demo`

use eventweave::{interweave, Span, SpanKind, Timeline};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Event {
    name: &'static str,
    begin: Option<&'static str>,
    end: Option<&'static str>,
}

fn event(name: &'static str, begin: Option<&'static str>, end: Option<&'static str>) -> Event {
    Event { name, begin, end }
}

fn main() {
    println!("=== Interweave Usage Example ===\n");

    let events = vec![
        event("company", None, None),
        event("contract", Some("2022-01-01"), Some("2025-01-01")),
        event("phase-1", Some("2023-01-01"), Some("2023-01-03")),
        event("phase-2", Some("2023-01-02"), Some("2023-01-04")),
        event("review", Some("2023-01-03"), Some("2023-01-03")),
        event("support", Some("2024-06-01"), None),
    ];

    println!("--- Events ---");
    for e in &events {
        let span = Span::from_options(e.begin, e.end);
        let kind = span.kind().map_or("invalid", describe);
        println!("  {:<10} {:<28} {}", e.name, span, kind);
    }

    println!("\n--- Active Sets ---");
    match interweave(&events, |e| (e.begin, e.end)) {
        Ok(sweep) => {
            for (i, set) in sweep.enumerate() {
                let mut names: Vec<&str> = set.iter().map(|e| e.name).collect();
                names.sort_unstable();
                println!("  {:>2}: {{{}}}", i, names.join(", "));
            }
        }
        Err(err) => println!("  error: {}", err),
    }

    println!("\n--- Rejecting Malformed Input ---");
    let mut timeline = Timeline::new();
    let accepted = timeline.insert("ok", Span::closed(1, 4));
    println!("  insert [1, 4] -> {:?}", accepted);
    let rejected = timeline.insert("bad", Span::closed(5, 2));
    match rejected {
        Ok(kind) => println!("  insert [5, 2] -> {:?}", kind),
        Err(err) => println!("  insert [5, 2] -> error: {}", err),
    }
    println!("  timeline still holds {} event(s)", timeline.len());
}

fn describe(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::Closed => "closed",
        SpanKind::Atomic => "atomic",
        SpanKind::UnboundedLeft => "open begin",
        SpanKind::UnboundedRight => "open end",
        SpanKind::Unbounded => "always",
    }
}
