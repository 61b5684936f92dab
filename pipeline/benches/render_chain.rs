use std::sync::{Arc, Mutex};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pipeline_core::base::VTermCard;
use pipeline_core::effects::{FlashCard, InactiveTintCard, RainbowCard};
use pipeline_core::Pipeline;
use term_core::{Color, VTerm};
use vte_core::Parser;

const COLS: usize = 120;
const ROWS: usize = 40;

fn colored_payload() -> Vec<u8> {
    let mut bytes = Vec::new();
    for row in 0..ROWS {
        bytes.extend_from_slice(format!("\x1b[{}H\x1b[38;5;{}m", row + 1, row % 256).as_bytes());
        bytes.extend(std::iter::repeat(b'@').take(COLS));
    }
    bytes
}

fn bench_base_card_only(c: &mut Criterion) {
    let term = Arc::new(Mutex::new(VTerm::new(COLS, ROWS)));
    {
        let mut parser = Parser::new();
        let mut t = term.lock().unwrap();
        parser.advance(&colored_payload(), &mut *t);
    }
    let pipeline = Pipeline::new();
    pipeline.push_card(Box::new(VTermCard::new(term)));

    c.bench_function("render_base_card_only", |b| {
        b.iter(|| black_box(pipeline.render(COLS, ROWS)));
    });
}

fn bench_full_chain(c: &mut Criterion) {
    let term = Arc::new(Mutex::new(VTerm::new(COLS, ROWS)));
    {
        let mut parser = Parser::new();
        let mut t = term.lock().unwrap();
        parser.advance(&colored_payload(), &mut *t);
    }
    let pipeline = Pipeline::new();
    pipeline.push_card(Box::new(VTermCard::new(term)));

    let (flash, flash_handle) = FlashCard::new(Color::Rgb { r: 200, g: 0, b: 0 }, std::time::Duration::from_millis(200));
    flash_handle.trigger();
    pipeline.push_card(Box::new(flash));

    let (rainbow, rainbow_handle) = RainbowCard::new(0.5, 0.6);
    rainbow_handle.set_enabled(true);
    pipeline.push_card(Box::new(rainbow));

    let (tint, tint_handle) = InactiveTintCard::new([0; 16], Color::Rgb { r: 40, g: 40, b: 40 });
    tint_handle.set_target([0; 16], 0.7, std::time::Duration::ZERO);
    pipeline.push_card(Box::new(tint));

    c.bench_function("render_full_effect_chain", |b| {
        b.iter(|| black_box(pipeline.render(COLS, ROWS)));
    });
}

criterion_group!(render_chain, bench_base_card_only, bench_full_chain);
criterion_main!(render_chain);
