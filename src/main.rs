//! Bid HashTable - console menu
//!
//! Loads the eBid monthly sales CSV into a [`BidHashTable`] and offers the
//! classic numbered menu: load, display all, find, remove, exit. Load, find
//! and remove report their elapsed time.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, LevelFilter};

use bid_hashtable::logger::initialize_logger;
use bid_hashtable::{load_bids, BidHashTable, DEFAULT_TABLE_SIZE};

/// Chained hash table of eBid auction records.
#[derive(Parser, Debug)]
#[command(name = "bid-hashtable", version, about)]
struct Args {
    /// CSV file to load bids from.
    #[arg(value_name = "CSV", default_value = "eBid_Monthly_Sales_Dec_2016.csv")]
    csv_path: PathBuf,

    /// Bid id used when the find/remove prompt is left empty.
    #[arg(value_name = "BID_ID", default_value = "98109")]
    bid_id: String,

    /// Number of hash table slots.
    #[arg(short = 's', long, default_value_t = DEFAULT_TABLE_SIZE)]
    table_size: usize,

    /// Log level for this program (RUST_LOG overrides).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

/// Numbered menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load,
    DisplayAll,
    Find,
    Remove,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::Load),
            "2" => Some(Choice::DisplayAll),
            "3" => Some(Choice::Find),
            "4" => Some(Choice::Remove),
            "9" => Some(Choice::Exit),
            _ => None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    initialize_logger(args.log_level);

    let mut table = BidHashTable::with_size(args.table_size)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };

        match Choice::parse(&line) {
            Some(Choice::Load) => {
                table = BidHashTable::with_size(args.table_size)?;

                let start = Instant::now();
                match load_bids(&args.csv_path, &mut table) {
                    Ok(report) => {
                        println!("{} bids read", report.loaded);
                        if report.skipped_count() > 0 {
                            println!("{} rows skipped", report.skipped_count());
                        }
                    }
                    Err(e) => error!("{}", e),
                }
                print_elapsed(start.elapsed());
            }
            Some(Choice::DisplayAll) => {
                let stdout = io::stdout();
                table.print_all(&mut stdout.lock())?;
            }
            Some(Choice::Find) => {
                let id = prompt_id(&mut input, &args.bid_id)?;

                let start = Instant::now();
                let found = table.search(&id);
                let elapsed = start.elapsed();

                match found {
                    Some(bid) => println!("{}", bid),
                    None => println!("Bid Id {} not found.", id),
                }
                print_elapsed(elapsed);
            }
            Some(Choice::Remove) => {
                let id = prompt_id(&mut input, &args.bid_id)?;

                let start = Instant::now();
                let removed = table.remove(&id);
                let elapsed = start.elapsed();

                match removed {
                    Some(bid) => println!("Removed {}", bid),
                    None => println!("Bid Id {} not found.", id),
                }
                print_elapsed(elapsed);
            }
            Some(Choice::Exit) => break,
            None => println!("Invalid choice: {}", line.trim()),
        }
    }

    println!("Good bye.");
    Ok(())
}

fn print_menu() -> io::Result<()> {
    println!("Menu:");
    println!("  1. Load Bids");
    println!("  2. Display All Bids");
    println!("  3. Find Bid");
    println!("  4. Remove Bid");
    println!("  9. Exit");
    print!("Enter choice: ");
    io::stdout().flush()
}

/// Read one line; None at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Ask for a bid id, falling back to `default` on empty input
fn prompt_id<R: BufRead>(input: &mut R, default: &str) -> io::Result<String> {
    print!("Enter bid id [{}]: ", default);
    io::stdout().flush()?;

    let id = read_line(input)?
        .map(|line| line.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| default.to_string());
    Ok(id)
}

fn print_elapsed(elapsed: Duration) {
    println!("time: {} microseconds", elapsed.as_micros());
    println!("time: {:.6} seconds", elapsed.as_secs_f64());
}
