use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vte_core::{Actor, CsiParam, Parser};

#[derive(Default)]
struct NullActor;

impl Actor for NullActor {
    fn print(&mut self, _c: char) {}
    fn execute(&mut self, _byte: u8) {}
    fn hook(&mut self, _byte: u8, _params: &[i64], _intermediates: &[u8], _ignored: bool) {}
    fn put(&mut self, _byte: u8) {}
    fn unhook(&mut self) {}
    fn esc_dispatch(&mut self, _params: &[i64], _intermediates: &[u8], _ignored: bool, _byte: u8) {}
    fn csi_dispatch(&mut self, _params: &[CsiParam], _truncated: bool, _byte: u8) {}
    fn osc_dispatch(&mut self, _params: &[&[u8]]) {}
}

fn bench_parse_mixed_stream(c: &mut Criterion) {
    let payload = "plain text \x1b[1;31mred bold\x1b[0m \x1b]0;title\x07 more\r\n".repeat(500);
    let bytes = payload.as_bytes();

    c.bench_function("parser_advance_mixed_stream", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let mut actor = NullActor::default();
            parser.advance(black_box(bytes), &mut actor);
        });
    });
}

fn bench_parse_plain_ascii(c: &mut Criterion) {
    let payload = "the quick brown fox jumps over the lazy dog\n".repeat(500);
    let bytes = payload.as_bytes();

    c.bench_function("parser_advance_plain_ascii", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let mut actor = NullActor::default();
            parser.advance(black_box(bytes), &mut actor);
        });
    });
}

criterion_group!(parse_throughput, bench_parse_mixed_stream, bench_parse_plain_ascii);
criterion_main!(parse_throughput);
