#![no_main]

use bitbuffer::fuzz::bit_buffer::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| harness(data));
