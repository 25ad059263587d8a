//! Fuzz target: `LineAssembler::push` + `classify`
//!
//! Drives arbitrary bytes through the line assembler and classifies every
//! line it yields.  Asserts that memory stays bounded, every emitted line
//! ends with the terminator, and slope extraction never panics.
//!
//! cargo fuzz run fuzz_line_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use tankcontroller::probe::parser::{LINE_CAPACITY, LineAssembler, ProbeResponse, classify};
use tankcontroller::probe::slope::{SlopeReport, extract_slope};

fuzz_target!(|data: &[u8]| {
    let mut asm = LineAssembler::new();

    for &byte in data {
        if let Some(line) = asm.push(byte) {
            assert!(line.ends_with('\r'), "line must keep its terminator");
            assert!(line.len() <= LINE_CAPACITY);

            if classify(&line) == ProbeResponse::SlopeAnswer {
                let _ = SlopeReport::parse(extract_slope(&line));
            }
        }
        assert!(asm.pending() <= LINE_CAPACITY, "assembler grew past one line");
    }

    // After a reset the assembler must accept bytes cleanly again.
    asm.reset();
    assert_eq!(asm.pending(), 0);
});
