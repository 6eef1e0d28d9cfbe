/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

/// Upper bound on the bits written by a single command.
const MAX_COMMAND_BITS: u64 = 67;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone, Copy)]
pub enum RandomCommand {
    Bits(u64, u8),
    Bool(bool),
    U8(u8),
    I16(i16),
    U32(u32),
    I64(i64),
    Fixed35(u64),
    CompactU8(u8),
    CompactI32(i32),
    CompactU64(u64),
}

pub fn harness(data: FuzzCase) {
    let mut buffer = BitBuffer::<u32>::with_capacity(0);
    buffer
        .ensure_capacity(data.commands.len() as u64 * MAX_COMMAND_BITS + 1, Position::ZERO)
        .unwrap();

    let mut positions = Vec::with_capacity(data.commands.len());
    let end = {
        let mut writer = BitWriter::new(&buffer);
        for command in &data.commands {
            positions.push(writer.index());
            let written = match *command {
                RandomCommand::Bits(value, n_bits) => {
                    writer.write_width(n_bits as usize % 65, value)
                }
                RandomCommand::Bool(value) => writer.write(value),
                RandomCommand::U8(value) => writer.write(value),
                RandomCommand::I16(value) => writer.write(value),
                RandomCommand::U32(value) => writer.write(value),
                RandomCommand::I64(value) => writer.write(value),
                RandomCommand::Fixed35(value) => writer.write_fixed::<35, u64>(value),
                RandomCommand::CompactU8(value) => writer.write_compact(value),
                RandomCommand::CompactI32(value) => writer.write_compact(value),
                RandomCommand::CompactU64(value) => writer.write_compact(value),
            };
            let start = positions[positions.len() - 1];
            assert_eq!(writer.usage(), start.bit_pos() + written as u64);
            assert_eq!(writer.usage() + writer.remaining_size(), buffer.capacity());
        }
        writer.flush()
    };
    assert_eq!(buffer.flushed_index(), end);

    // Termination must round trip without touching the data
    let word = buffer.word(end);
    let terminated = buffer.terminate(end);
    assert!(terminated > end);
    assert_eq!(buffer.unterminate(terminated), end);
    assert_eq!(buffer.word(end), word);

    let mut reader = BitReader::new(&buffer);
    assert_eq!(reader.available(), end.bit_pos());
    for (command, position) in data.commands.iter().zip(positions) {
        assert_eq!(reader.index(), position);
        assert_eq!(Position::decode64(position.encode64()), position);
        match *command {
            RandomCommand::Bits(value, n_bits) => {
                let n_bits = n_bits as usize % 65;
                assert_eq!(reader.read_width::<u64>(n_bits), lower_bits(value, n_bits));
            }
            RandomCommand::Bool(value) => assert_eq!(reader.read::<bool>(), value),
            RandomCommand::U8(value) => assert_eq!(reader.read::<u8>(), value),
            RandomCommand::I16(value) => assert_eq!(reader.read::<i16>(), value),
            RandomCommand::U32(value) => assert_eq!(reader.read::<u32>(), value),
            RandomCommand::I64(value) => assert_eq!(reader.read::<i64>(), value),
            RandomCommand::Fixed35(value) => {
                assert_eq!(reader.read_fixed::<35, u64>(), lower_bits(value, 35))
            }
            RandomCommand::CompactU8(value) => assert_eq!(reader.read_compact::<u8>(), value),
            RandomCommand::CompactI32(value) => {
                assert_eq!(reader.read_compact::<i32>(), value)
            }
            RandomCommand::CompactU64(value) => {
                assert_eq!(reader.read_compact::<u64>(), value)
            }
        }
    }
    assert_eq!(reader.index(), end);
    assert_eq!(reader.available(), 0);
}
