mod cli;

use structopt::StructOpt;

use cli::args::Arena;
use cli::commands::Command;

fn main() {
    env_logger::init();
    Arena::from_args().execute();
}
