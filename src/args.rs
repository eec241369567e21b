use crate::board::{DEFAULT_DIFFICULTY, DEFAULT_H, DEFAULT_W, MIN_H, MIN_W};
use clap::{Parser, value_parser};
use std::path::PathBuf;

pub const MAX_W: u16 = 256;
pub const MAX_H: u16 = 256;

/// Terminal minesweeper
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct MinesweptArgs {
    /// board width
    #[arg(short = 'x', long, default_value_t = DEFAULT_W,
        value_parser = value_parser!(u16).range(MIN_W as i64..=MAX_W as i64))]
    pub width: u16,
    /// board height
    #[arg(short = 'y', long, default_value_t = DEFAULT_H,
        value_parser = value_parser!(u16).range(MIN_H as i64..=MAX_H as i64))]
    pub height: u16,
    /// percentage of the maximum mine count, 1 to 100
    #[arg(short, long, default_value_t = DEFAULT_DIFFICULTY,
        value_parser = value_parser!(u8).range(1..=100))]
    pub difficulty: u8,
    /// do not open neighbors when revealing a satisfied number
    #[arg(long)]
    pub no_reveal_around: bool,
    /// fixed seed for reproducible mine placement
    #[arg(long)]
    pub seed: Option<u64>,
    /// write debug logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
