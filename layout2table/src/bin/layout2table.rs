use clap::Parser;
use std::path::PathBuf;

use layout2table::convert_layout_file;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kana layout to lookup-table and ruleset compiler", long_about = None)]
struct Args {
    /// Input layout definition (JSON)
    input: PathBuf,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let written = convert_layout_file(&args.input, args.out_dir.as_deref())?;

    if args.verbose {
        for path in &written {
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
