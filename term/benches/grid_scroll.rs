use criterion::{black_box, criterion_group, criterion_main, Criterion};
use term_core::VTerm;

fn bench_full_screen_scroll(c: &mut Criterion) {
    c.bench_function("vterm_full_screen_scroll", |b| {
        let mut term = VTerm::new(120, 50);
        b.iter(|| {
            term.line_feed();
            black_box(term.cursor());
        });
    });
}

fn bench_rectangular_scroll(c: &mut Criterion) {
    c.bench_function("vterm_rectangular_scroll_with_margins", |b| {
        let mut parser = vte_core::Parser::new();
        let mut term = VTerm::new(120, 50);
        parser.advance(b"\x1b[?69h\x1b[10;40s\x1b[5;30r", &mut term);
        b.iter(|| {
            parser.advance(b"\x1b[1S", &mut term);
            black_box(term.grid());
        });
    });
}

fn bench_parse_and_place(c: &mut Criterion) {
    let payload = "line of plain text with \x1b[31msome\x1b[0m color\r\n".repeat(200);
    c.bench_function("vterm_parse_colored_lines", |b| {
        b.iter(|| {
            let mut parser = vte_core::Parser::new();
            let mut term = VTerm::new(120, 50);
            parser.advance(payload.as_bytes(), &mut term);
            black_box(term.cursor());
        });
    });
}

criterion_group!(
    grid_scroll,
    bench_full_screen_scroll,
    bench_rectangular_scroll,
    bench_parse_and_place
);
criterion_main!(grid_scroll);
