use std::sync::{Arc, Mutex};
use std::time::Duration;

use pipeline_core::base::VTermCard;
use pipeline_core::effects::FlashCard;
use pipeline_core::Pipeline;
use term_core::{Color, VTerm};
use vte_core::Parser;

fn main() {
    let term = Arc::new(Mutex::new(VTerm::new(20, 4)));
    {
        let mut parser = Parser::new();
        let mut t = term.lock().unwrap();
        parser.advance(b"\x1b[1;1Hhello, \x1b[1mworld\x1b[0m", &mut *t);
    }

    let pipeline = Pipeline::new();
    pipeline.push_card(Box::new(VTermCard::new(term)));

    let (flash, flash_handle) = FlashCard::new(Color::Rgb { r: 200, g: 40, b: 40 }, Duration::from_millis(150));
    pipeline.push_card(Box::new(flash));

    flash_handle.trigger();
    let frame = pipeline.render(20, 4);
    for row in frame.rows() {
        let line: String = row.iter().map(|cell| if cell.is_transparent() { ' ' } else { cell.rune }).collect();
        println!("{line}");
    }
}
