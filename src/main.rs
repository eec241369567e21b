use args::MinesweptArgs;
use clap::Parser;
use color_eyre::Result;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::fs::File;

mod action;
mod args;
mod board;
mod error;
mod generator;
mod input_state;
mod tile;
mod ui;
mod util;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = MinesweptArgs::parse();
    if let Some(path) = &args.log_file {
        WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)?;
    }
    ui::main(args)
}
